//! Verify parsing, merging and classification against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each vector file lists named cases with inputs and expected outputs, so
//! new edge cases can be added without touching Rust code.

use httpkit_core::{
    Blob, Body, ContentType, FormData, Headers, Request, RequestOptionsArgs, UrlSearchParams,
};
use indexmap::IndexMap;

fn load(raw: &str) -> Vec<serde_json::Value> {
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the content-type name used in test vectors into `ContentType`.
fn parse_content_type(s: &str) -> ContentType {
    match s {
        "none" => ContentType::None,
        "json" => ContentType::Json,
        "form" => ContentType::Form,
        "form_data" => ContentType::FormData,
        "text" => ContentType::Text,
        "blob" => ContentType::Blob,
        "array_buffer" => ContentType::ArrayBuffer,
        other => panic!("unknown content type: {other}"),
    }
}

/// Build a sample body of the named shape.
fn sample_body(s: &str) -> Option<Body> {
    match s {
        "none" => None,
        "json" => Some(Body::Json(serde_json::json!({"a": 1}))),
        "json_array" => Some(Body::Json(serde_json::json!([1, 2]))),
        "json_null" => Some(Body::Json(serde_json::Value::Null)),
        "json_number" => Some(Body::Json(serde_json::json!(42))),
        "json_string" => Some(Body::Json(serde_json::json!("hi"))),
        "json_bool" => Some(Body::Json(serde_json::json!(true))),
        "text" => Some(Body::Text("hello".to_string())),
        "params" => Some(Body::Params(UrlSearchParams::new("a=1"))),
        "form_data" => Some(Body::FormData(FormData::new())),
        "blob" => Some(Body::Blob(Blob::new(vec![1u8], "image/png"))),
        "array_buffer" => Some(Body::ArrayBuffer(vec![1u8, 2].into())),
        other => panic!("unknown body shape: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Header blocks
// ---------------------------------------------------------------------------

#[test]
fn header_block_test_vectors() {
    for case in load(include_str!("../../test-vectors/header_blocks.json")) {
        let name = case["name"].as_str().unwrap();
        let headers = Headers::from_response_header_string(case["block"].as_str().unwrap());

        let expected_keys: Vec<String> = serde_json::from_value(case["expected_keys"].clone()).unwrap();
        assert_eq!(headers.keys(), expected_keys, "{name}: keys");

        let expected: IndexMap<String, String> = serde_json::from_value(case["expected"].clone()).unwrap();
        assert_eq!(headers.len(), expected.len(), "{name}: count");
        for (header, value) in &expected {
            assert_eq!(headers.get(header), Some(value.as_str()), "{name}: {header}");
        }
    }
}

// ---------------------------------------------------------------------------
// Search params merges
// ---------------------------------------------------------------------------

#[test]
fn search_params_test_vectors() {
    for case in load(include_str!("../../test-vectors/search_params.json")) {
        let name = case["name"].as_str().unwrap();
        let mut params = UrlSearchParams::new(case["base"].as_str().unwrap());
        let other = UrlSearchParams::new(case["other"].as_str().unwrap());

        match case["operation"].as_str().unwrap() {
            "set_all" => params.set_all(&other),
            "append_all" => params.append_all(&other),
            "replace_all" => params.replace_all(&other),
            op => panic!("unknown operation: {op}"),
        }

        let expected: IndexMap<String, Vec<String>> =
            serde_json::from_value(case["expected"].clone()).unwrap();
        for (param, values) in &expected {
            assert_eq!(&params.get_all(param), values, "{name}: {param}");
        }
        assert_eq!(params.iter().count(), expected.len(), "{name}: names");
        assert_eq!(
            params.to_string(),
            case["expected_string"].as_str().unwrap(),
            "{name}: rendered"
        );
    }
}

// ---------------------------------------------------------------------------
// Content-type detection
// ---------------------------------------------------------------------------

#[test]
fn content_type_test_vectors() {
    for case in load(include_str!("../../test-vectors/content_type.json")) {
        let name = case["name"].as_str().unwrap();
        let mut args = RequestOptionsArgs::new().url("http://localhost/");
        if let Some(header) = case["header"].as_str() {
            args = args.headers(Headers::from_map([("Content-Type", header)]));
        }
        args.body = sample_body(case["body"].as_str().unwrap());

        let request = Request::new(args);
        assert_eq!(
            request.content_type(),
            parse_content_type(case["expected"].as_str().unwrap()),
            "{name}"
        );
    }
}

// ---------------------------------------------------------------------------
// URL splicing
// ---------------------------------------------------------------------------

#[test]
fn request_url_test_vectors() {
    for case in load(include_str!("../../test-vectors/request_urls.json")) {
        let name = case["name"].as_str().unwrap();
        let request = Request::new(
            RequestOptionsArgs::new()
                .url(case["url"].as_str().unwrap())
                .params(case["params"].as_str().unwrap()),
        );
        assert_eq!(request.url, case["expected"].as_str().unwrap(), "{name}");
    }
}
