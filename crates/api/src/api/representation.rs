// Response representations selected by the Accept header
//
// Decision: JSON is the default; XML is offered for resource bodies
// Decision: Ranges are taken in the order the client lists them, q-values are not weighed
// Decision: Problem details stay application/problem+json whatever was negotiated

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use courselib_core::{AuthorDto, CourseDto};
use serde::Serialize;

use super::error::ApiError;

pub const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

const JSON_MEDIA_RANGES: &[&str] = &[
    "*/*",
    "application/*",
    "application/json",
    "application/problem+json",
];

const XML_MEDIA_RANGES: &[&str] = &["application/xml", "text/xml", "text/*"];

/// Element name of a resource in its XML representation.
pub trait XmlElement {
    const ELEMENT: &'static str;
}

impl XmlElement for AuthorDto {
    const ELEMENT: &'static str = "AuthorDto";
}

impl XmlElement for CourseDto {
    const ELEMENT: &'static str = "CourseDto";
}

/// Media type a response body is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Representation {
    #[default]
    Json,
    Xml,
}

impl Representation {
    /// Representation for the request's `Accept` header, or `None` when no
    /// listed range can be served. A missing or empty header accepts JSON.
    pub fn negotiate(headers: &HeaderMap) -> Option<Self> {
        let mut saw_range = false;
        for value in headers.get_all(header::ACCEPT) {
            let Ok(value) = value.to_str() else {
                continue;
            };
            for range in value.split(',') {
                let media_type = range.split(';').next().unwrap_or_default().trim();
                if media_type.is_empty() {
                    continue;
                }
                saw_range = true;
                if matches_any(media_type, JSON_MEDIA_RANGES) {
                    return Some(Self::Json);
                }
                if matches_any(media_type, XML_MEDIA_RANGES) {
                    return Some(Self::Xml);
                }
            }
        }

        if saw_range {
            None
        } else {
            Some(Self::Json)
        }
    }

    /// `200 OK` with one resource.
    pub fn one<T: Serialize + XmlElement>(self, body: &T) -> Result<Response, ApiError> {
        match self {
            Self::Json => Ok(Json(body).into_response()),
            Self::Xml => Ok(xml_response(element_xml(body)?)),
        }
    }

    /// `200 OK` with a list of resources.
    pub fn many<T: Serialize + XmlElement>(self, body: &[T]) -> Result<Response, ApiError> {
        match self {
            Self::Json => Ok(Json(body).into_response()),
            Self::Xml => {
                let mut xml = format!("<ArrayOf{}>", T::ELEMENT);
                for item in body {
                    xml.push_str(&element_xml(item)?);
                }
                xml.push_str(&format!("</ArrayOf{}>", T::ELEMENT));
                Ok(xml_response(xml))
            }
        }
    }
}

fn matches_any(media_type: &str, ranges: &[&str]) -> bool {
    ranges
        .iter()
        .any(|range| media_type.eq_ignore_ascii_case(range))
}

fn element_xml<T: Serialize + XmlElement>(value: &T) -> Result<String, ApiError> {
    quick_xml::se::to_string_with_root(T::ELEMENT, value)
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e).context("XML serialization failed")))
}

fn xml_response(xml: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static(XML_CONTENT_TYPE))],
        xml,
    )
        .into_response()
}

#[async_trait]
impl<S> FromRequestParts<S> for Representation
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::negotiate(&parts.headers).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use uuid::Uuid;

    fn accept(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn author() -> AuthorDto {
        AuthorDto {
            id: Uuid::from_u128(0x102b566b_ba1f_404c_b2df_e2cde39ade09),
            name: "Arnold Ned Flint".to_string(),
            age: 324,
            main_category: "Singing".to_string(),
        }
    }

    #[test]
    fn test_missing_accept_is_json() {
        assert_eq!(
            Representation::negotiate(&HeaderMap::new()),
            Some(Representation::Json)
        );
        assert_eq!(
            Representation::negotiate(&accept("")),
            Some(Representation::Json)
        );
    }

    #[test]
    fn test_json_ranges() {
        for value in [
            "application/json",
            "Application/JSON; charset=utf-8",
            "text/html, */*;q=0.8",
            "application/*",
        ] {
            assert_eq!(
                Representation::negotiate(&accept(value)),
                Some(Representation::Json),
                "{value}"
            );
        }
    }

    #[test]
    fn test_xml_ranges() {
        assert_eq!(
            Representation::negotiate(&accept("application/xml")),
            Some(Representation::Xml)
        );
        assert_eq!(
            Representation::negotiate(&accept("text/html, text/xml;q=0.9")),
            Some(Representation::Xml)
        );
        assert_eq!(
            Representation::negotiate(&accept("application/xml, application/json")),
            Some(Representation::Xml)
        );
    }

    #[test]
    fn test_unservable_ranges() {
        assert_eq!(Representation::negotiate(&accept("text/html")), None);
        assert_eq!(Representation::negotiate(&accept("image/png, text/csv")), None);
    }

    #[tokio::test]
    async fn test_one_as_xml() {
        let response = Representation::Xml.one(&author()).unwrap();

        assert_eq!(response.headers()[header::CONTENT_TYPE], XML_CONTENT_TYPE);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let xml = String::from_utf8(body.to_vec()).unwrap();
        assert!(xml.starts_with("<AuthorDto>"));
        assert!(xml.contains("<name>Arnold Ned Flint</name>"));
        assert!(xml.contains("<mainCategory>Singing</mainCategory>"));
    }

    #[tokio::test]
    async fn test_many_as_xml_is_wrapped() {
        let response = Representation::Xml.many(&[author(), author()]).unwrap();

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let xml = String::from_utf8(body.to_vec()).unwrap();
        assert!(xml.starts_with("<ArrayOfAuthorDto><AuthorDto>"));
        assert!(xml.ends_with("</AuthorDto></ArrayOfAuthorDto>"));
        assert_eq!(xml.matches("<AuthorDto>").count(), 2);
    }

    #[tokio::test]
    async fn test_empty_list_as_xml() {
        let response = Representation::Xml.many::<CourseDto>(&[]).unwrap();

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"<ArrayOfCourseDto></ArrayOfCourseDto>");
    }

    #[tokio::test]
    async fn test_json_is_default() {
        let response = Representation::default().many(&[author()]).unwrap();

        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json[0]["name"], "Arnold Ned Flint");
    }
}
