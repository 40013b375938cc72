use wasm_bindgen::JsValue;

#[derive(Debug)]
pub enum GpxTrackError {
    XmlParse(quick_xml::Error),
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
    NoTrackPoints {
        file_name: String,
    },
}

impl std::fmt::Display for GpxTrackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::XmlParse(e) => write!(f, "XML parse error: {e}"),
            Self::MissingAttribute { element, attribute } => {
                write!(f, "Missing attribute '{attribute}' on <{element}>")
            }
            Self::InvalidAttribute {
                element,
                attribute,
                value,
            } => write!(
                f,
                "Invalid value '{value}' for attribute '{attribute}' on <{element}>"
            ),
            Self::NoTrackPoints { file_name } => {
                write!(f, "No track points found in '{file_name}'")
            }
        }
    }
}

impl std::error::Error for GpxTrackError {}

impl From<quick_xml::Error> for GpxTrackError {
    fn from(e: quick_xml::Error) -> Self {
        Self::XmlParse(e)
    }
}

impl From<GpxTrackError> for JsValue {
    fn from(e: GpxTrackError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
