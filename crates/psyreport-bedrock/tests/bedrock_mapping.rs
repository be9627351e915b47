use aws_sdk_bedrockruntime::types::ImageFormat;
use aws_smithy_types::Document;
use psyreport_bedrock::bedrock::{image_format_for_mime, is_input_too_large};
use psyreport_bedrock::document;
use psyreport_bedrock::extract::extraction_schema;
use serde_json::json;

#[test]
fn converse_image_formats() {
    assert_eq!(image_format_for_mime("image/png"), Some(ImageFormat::Png));
    assert_eq!(image_format_for_mime("IMAGE/JPEG"), Some(ImageFormat::Jpeg));
    assert_eq!(image_format_for_mime("image/webp"), Some(ImageFormat::Webp));
    assert_eq!(image_format_for_mime("image/tiff"), None);
}

#[test]
fn input_size_validation_messages_are_recognised() {
    assert!(is_input_too_large("Input is too long for requested model."));
    assert!(is_input_too_large("prompt token count exceeds the limit"));
    assert!(!is_input_too_large("Malformed input request"));
}

#[test]
fn schema_survives_document_conversion() {
    let schema = extraction_schema().json_schema;
    let doc = document::from_json(&schema);
    assert!(matches!(doc, Document::Object(_)));
    assert_eq!(document::to_json(&doc), schema);
}

#[test]
fn numbers_keep_their_sign_and_kind() {
    let value = json!({ "pos": 3, "neg": -2, "float": 1.5, "list": [true, null] });
    assert_eq!(document::to_json(&document::from_json(&value)), value);
}
