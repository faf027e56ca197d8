//! SOAP/XML proxy.
//!
//! Requests are serialized with `quick_xml::se`. Responses are read with the
//! streaming reader and matched on local element names, so any namespace
//! prefix the remote side uses (`s:Envelope`, `soap:Body`, ...) is accepted.

use std::time::Duration;

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde::Serialize;
use validator::Validate;

use strata_core::config::proxy::ProxyConfig;
use strata_core::error::{AppError, ErrorKind};
use strata_core::result::AppResult;
use strata_core::validation::validate;

const NAMESPACE_A: &str = "http://sample.com/";
const NAMESPACE_B: &str = "http://sample.net/";

/// Input of [`SampleXmlProxy::post_sample_xml`].
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename = "Sample", rename_all = "PascalCase")]
pub struct SampleXmlRequest {
    #[validate(length(min = 1))]
    pub sample_name: String,
    #[validate(length(min = 1))]
    pub sample_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_code: Option<i32>,
}

/// Result parsed from the SOAP response body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleXmlResponse {
    pub is_success: bool,
    pub message: String,
}

/// Posts a sample to a SOAP endpoint.
#[async_trait]
pub trait SampleXmlProxy: Send + Sync + 'static {
    async fn post_sample_xml(&self, request: &SampleXmlRequest) -> AppResult<SampleXmlResponse>;
}

#[derive(Serialize)]
#[serde(rename = "Soapenv:Envelope")]
struct Envelope<'a> {
    #[serde(rename = "@xmlns:a")]
    xmlns_a: &'a str,
    #[serde(rename = "@xmlns:b")]
    xmlns_b: &'a str,
    #[serde(rename = "Soapenv:Body")]
    body: Body<'a>,
}

#[derive(Serialize)]
struct Body<'a> {
    #[serde(rename = "Username")]
    username: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
    #[serde(rename = "Model")]
    model: Model<'a>,
}

#[derive(Serialize)]
struct Model<'a> {
    #[serde(rename = "Sample")]
    sample: &'a SampleXmlRequest,
}

/// Render the request envelope.
pub fn build_envelope(request: &SampleXmlRequest) -> AppResult<String> {
    let envelope = Envelope {
        xmlns_a: NAMESPACE_A,
        xmlns_b: NAMESPACE_B,
        body: Body {
            username: "",
            password: "",
            model: Model { sample: request },
        },
    };
    quick_xml::se::to_string(&envelope).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Failed to serialize SOAP envelope: {e}"),
            e,
        )
    })
}

/// Extract `Envelope/Body/{isSuccess,message}` from a SOAP response.
pub fn parse_response(xml: &str) -> AppResult<SampleXmlResponse> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut response = SampleXmlResponse::default();
    let mut saw_body = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name().as_ref().to_vec();
                if path.len() == 1 && name == b"Body" {
                    saw_body = true;
                }
                path.push(name);
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Text(t)) => {
                let in_body = path.len() == 3
                    && path[0].as_slice() == b"Envelope"
                    && path[1].as_slice() == b"Body";
                if !in_body {
                    continue;
                }
                let text = t.unescape().map_err(xml_error)?;
                match path[2].as_slice() {
                    b"isSuccess" => {
                        response.is_success = matches!(text.trim(), "true" | "1");
                    }
                    b"message" => response.message = text.into_owned(),
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(xml_error(e)),
        }
    }

    if !saw_body {
        return Err(AppError::external_service(
            "SOAP response has no Envelope/Body element",
        ));
    }
    Ok(response)
}

fn xml_error(e: quick_xml::Error) -> AppError {
    AppError::with_source(
        ErrorKind::ExternalService,
        format!("Couldn't parse SOAP response: {e}"),
        e,
    )
}

/// [`SampleXmlProxy`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpSampleXmlProxy {
    client: Client,
    url: Url,
    soap_action: String,
}

impl HttpSampleXmlProxy {
    /// Create the proxy from configuration.
    pub fn new(config: &ProxyConfig) -> AppResult<Self> {
        let raw = config.soap_url();
        let url = Url::parse(raw).map_err(|e| {
            AppError::configuration(format!("Couldn't parse SOAP proxy url '{raw}': {e}"))
        })?;
        let client = crate::build_client(Duration::from_secs(config.timeout_seconds))?;
        Ok(Self {
            client,
            url,
            soap_action: config.soap_action.clone(),
        })
    }
}

#[async_trait]
impl SampleXmlProxy for HttpSampleXmlProxy {
    async fn post_sample_xml(&self, request: &SampleXmlRequest) -> AppResult<SampleXmlResponse> {
        validate(request)?;
        let envelope = build_envelope(request)?;

        let body = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", self.soap_action.as_str())
            .body(envelope)
            .send()
            .await?
            .text()
            .await?;

        parse_response(&body)
    }
}
