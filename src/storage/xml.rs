use std::{fs, io, num::ParseIntError, path::Path};

use quick_xml::{DeError, se::Serializer};
use serde::{Deserialize, Serialize};

use crate::{Catalog, Route};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// A route catalog serialized as an XML document.
///
/// Each record becomes one `<route>` element whose three fields are stored
/// as a `text` attribute on a correspondingly named child element. Element
/// order is record order.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "routes")]
struct XmlCatalog {
    #[serde(rename = "route", default)]
    routes: Vec<XmlRoute>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlRoute {
    start: TextValue,
    finish: TextValue,
    number: TextValue,
}

/// A field value stored as a `text` attribute.
#[derive(Debug, Serialize, Deserialize)]
struct TextValue {
    #[serde(rename = "@text")]
    text: String,
}

impl From<&Route> for XmlRoute {
    fn from(route: &Route) -> Self {
        Self {
            start: TextValue {
                text: route.start().to_string(),
            },
            finish: TextValue {
                text: route.finish().to_string(),
            },
            number: TextValue {
                text: route.number().to_string(),
            },
        }
    }
}

impl From<&Catalog> for XmlCatalog {
    fn from(catalog: &Catalog) -> Self {
        Self {
            routes: catalog.iter().map(XmlRoute::from).collect(),
        }
    }
}

impl TryFrom<XmlRoute> for Route {
    type Error = ParseIntError;

    fn try_from(route: XmlRoute) -> Result<Self, Self::Error> {
        let XmlRoute {
            start,
            finish,
            number,
        } = route;
        let number = number.text.parse()?;

        Ok(Self::new(start.text, finish.text, number))
    }
}

impl TryFrom<XmlCatalog> for Catalog {
    type Error = ParseIntError;

    fn try_from(catalog: XmlCatalog) -> Result<Self, Self::Error> {
        catalog.routes.into_iter().map(Route::try_from).collect()
    }
}

fn to_document(catalog: &XmlCatalog) -> String {
    let mut body = String::new();
    let mut serializer = Serializer::new(&mut body);
    serializer.indent(' ', 2);
    catalog.serialize(serializer).expect("this must never fail");

    format!("{XML_DECLARATION}\n{body}\n")
}

/// Serializes the catalog to the data file at `path`.
///
/// Any existing content is replaced; the whole collection is rewritten on
/// every call.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn save(path: &Path, catalog: &Catalog) -> io::Result<()> {
    fs::write(path, to_document(&XmlCatalog::from(catalog)))
}

/// Reads the catalog from the data file at `path`, preserving record
/// order.
///
/// Callers are expected to check that the path exists: a missing data file
/// means "start from an empty catalog" and is not a load error.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not well-formed XML, or
/// holds a route number that is not an integer.
pub fn load(path: &Path) -> Result<Catalog, LoadError> {
    let content = fs::read_to_string(path)?;
    let catalog: XmlCatalog = quick_xml::de::from_str(&content)?;

    Ok(catalog.try_into()?)
}

/// Errors that can occur when loading routes from the data file.
#[derive(Debug, thiserror::Error)]
#[error("failed to read the route data file")]
pub enum LoadError {
    /// An I/O error occurred.
    Io(#[from] io::Error),
    /// The document is not well-formed XML.
    Xml(#[from] DeError),
    /// A route number is not an integer.
    Number(#[from] ParseIntError),
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn route(start: &str, finish: &str, number: i64) -> Route {
        Route::new(start.to_string(), finish.to_string(), number)
    }

    fn sample_catalog() -> Catalog {
        [
            route("Moscow", "Kazan", 512),
            route("Kazan", "Ufa", 512),
            route("Ufa", "Perm", 77),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn save_and_load_round_trip() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("routes.xml");

        let catalog = sample_catalog();
        save(&path, &catalog).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, catalog);
    }

    #[test]
    fn round_trip_preserves_special_characters() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("routes.xml");

        // quotes, angle brackets and ampersands must survive attribute
        // escaping unchanged
        let catalog: Catalog = [route("St. \"Old\" <Town>", "B&B 'Inn'", -3)]
            .into_iter()
            .collect();
        save(&path, &catalog).unwrap();

        assert_eq!(load(&path).unwrap(), catalog);
    }

    #[test]
    fn empty_catalog_round_trip() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("routes.xml");

        save(&path, &Catalog::new()).unwrap();

        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn save_declares_the_encoding() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("routes.xml");

        save(&path, &sample_catalog()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
    }

    #[test]
    fn save_replaces_existing_content() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("routes.xml");

        save(&path, &sample_catalog()).unwrap();
        let replacement: Catalog = [route("Perm", "Omsk", 9)].into_iter().collect();
        save(&path, &replacement).unwrap();

        assert_eq!(load(&path).unwrap(), replacement);
    }

    #[test]
    fn load_parses_handwritten_document_in_order() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("routes.xml");

        let document = r#"<?xml version="1.0" encoding="utf-8"?>
<routes>
  <route>
    <start text="Moscow"/>
    <finish text="Kazan"/>
    <number text="512"/>
  </route>
  <route>
    <start text="Kazan"/>
    <finish text=""/>
    <number text="77"/>
  </route>
</routes>"#;
        fs::write(&path, document).unwrap();

        let catalog = load(&path).unwrap();
        assert_eq!(
            catalog.routes(),
            [route("Moscow", "Kazan", 512), route("Kazan", "", 77)]
        );
    }

    #[test]
    fn load_rejects_malformed_document() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("routes.xml");

        fs::write(&path, "<routes><route></routes>").unwrap();

        assert!(matches!(load(&path), Err(LoadError::Xml(_))));
    }

    #[test]
    fn load_rejects_incomplete_record() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("routes.xml");

        fs::write(
            &path,
            r#"<routes><route><start text="Moscow"/></route></routes>"#,
        )
        .unwrap();

        assert!(matches!(load(&path), Err(LoadError::Xml(_))));
    }

    #[test]
    fn load_rejects_non_integer_number() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("routes.xml");

        fs::write(
            &path,
            r#"<routes><route><start text="Moscow"/><finish text="Kazan"/><number text="twelve"/></route></routes>"#,
        )
        .unwrap();

        assert!(matches!(load(&path), Err(LoadError::Number(_))));
    }

    #[test]
    fn load_missing_file_is_an_io_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("missing.xml");

        assert!(matches!(load(&path), Err(LoadError::Io(_))));
    }
}
