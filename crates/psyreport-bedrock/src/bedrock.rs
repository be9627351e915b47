//! [`GenerationService`] backed by the Bedrock Converse API.
//!
//! Converse has no native "respond with JSON matching this schema" switch, so
//! the schema is expressed as a single tool whose input schema *is* the
//! output schema, and `tool_choice` forces the model to call it. The tool
//! call's input is the structured answer.
//!
//! Images travel as `ImageBlock`s. Converse only accepts PNG, JPEG, GIF and
//! WebP; other image types fail with [`GenerationError::UnsupportedMedia`]
//! before any request is sent.

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::operation::converse::ConverseError;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, ImageBlock, ImageFormat, ImageSource, Message,
    SpecificToolChoice, SystemContentBlock, Tool, ToolChoice, ToolConfiguration,
    ToolInputSchema, ToolSpecification,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{info, warn};
use uuid::Uuid;

use crate::document;
use crate::error::GenerationError;
use crate::service::{
    BoxFuture, ContentPart, GenerationOutput, GenerationRequest, GenerationService, OutputSchema,
};
use crate::tokens;

/// Fragments Bedrock uses in `ValidationException` messages when the prompt
/// exceeds the model's context window or payload limit.
const INPUT_TOO_LARGE_HINTS: &[&str] = &["too long", "too large", "token count", "max_tokens"];

pub struct BedrockGenerator {
    client: Client,
    model_id: String,
}

impl BedrockGenerator {
    pub fn new(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(config),
            model_id: model_id.into(),
        }
    }

    async fn converse(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationOutput, GenerationError> {
        let request_id = Uuid::new_v4();

        let mut message = Message::builder().role(ConversationRole::User);
        for part in &request.parts {
            message = message.content(content_block(part)?);
        }
        let message = message
            .build()
            .map_err(|e| GenerationError::Invocation(e.to_string()))?;

        let mut converse = self
            .client
            .converse()
            .model_id(&self.model_id)
            .messages(message)
            .tool_config(tool_configuration(&request.schema)?);
        if let Some(system_prompt) = &request.system_prompt {
            converse = converse.system(SystemContentBlock::Text(system_prompt.clone()));
        }

        info!(
            request_id = %request_id,
            model_id = %self.model_id,
            schema = %request.schema.name,
            parts = request.parts.len(),
            "invoking model"
        );

        let response = converse
            .send()
            .await
            .map_err(|e| classify_converse_error(e.into_service_error()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| GenerationError::ResponseParse("no message in response".to_string()))?;

        let input = output_message
            .content()
            .iter()
            .find_map(|block| match block {
                ContentBlock::ToolUse(tool_use) if tool_use.name() == request.schema.name => {
                    Some(tool_use.input())
                }
                _ => None,
            })
            .ok_or_else(|| {
                GenerationError::SchemaViolation(format!(
                    "model did not return a `{}` tool call",
                    request.schema.name
                ))
            })?;

        let usage = response.usage().map(tokens::extract_token_usage);
        info!(
            request_id = %request_id,
            input_tokens = usage.map(|u| u.input).unwrap_or_default(),
            output_tokens = usage.map(|u| u.output).unwrap_or_default(),
            "model invocation complete"
        );

        Ok(GenerationOutput {
            json: document::to_json(input),
            usage,
        })
    }
}

impl GenerationService for BedrockGenerator {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn generate(
        &self,
        request: GenerationRequest,
    ) -> BoxFuture<'_, Result<GenerationOutput, GenerationError>> {
        Box::pin(self.converse(request))
    }
}

fn content_block(part: &ContentPart) -> Result<ContentBlock, GenerationError> {
    match part {
        ContentPart::Text(text) => Ok(ContentBlock::Text(text.clone())),
        ContentPart::InlineData {
            mime_type,
            data_base64,
        } => {
            let format = image_format_for_mime(mime_type)
                .ok_or_else(|| GenerationError::UnsupportedMedia(mime_type.clone()))?;
            let bytes = STANDARD
                .decode(data_base64)
                .map_err(|e| GenerationError::UnsupportedMedia(format!("invalid base64: {e}")))?;
            let image = ImageBlock::builder()
                .format(format)
                .source(ImageSource::Bytes(aws_smithy_types::Blob::new(bytes)))
                .build()
                .map_err(|e| GenerationError::Invocation(e.to_string()))?;
            Ok(ContentBlock::Image(image))
        }
    }
}

fn tool_configuration(schema: &OutputSchema) -> Result<ToolConfiguration, GenerationError> {
    let spec = ToolSpecification::builder()
        .name(&schema.name)
        .description(&schema.description)
        .input_schema(ToolInputSchema::Json(document::from_json(&schema.json_schema)))
        .build()
        .map_err(|e| GenerationError::Invocation(e.to_string()))?;

    let choice = SpecificToolChoice::builder()
        .name(&schema.name)
        .build()
        .map_err(|e| GenerationError::Invocation(e.to_string()))?;

    ToolConfiguration::builder()
        .tools(Tool::ToolSpec(spec))
        .tool_choice(ToolChoice::Tool(choice))
        .build()
        .map_err(|e| GenerationError::Invocation(e.to_string()))
}

/// Map a MIME type to a Converse `ImageFormat`.
///
/// Returns `None` for image types Converse cannot take.
pub fn image_format_for_mime(mime_type: &str) -> Option<ImageFormat> {
    match mime_type.to_ascii_lowercase().as_str() {
        "image/png" => Some(ImageFormat::Png),
        "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageFormat::Jpeg),
        "image/gif" => Some(ImageFormat::Gif),
        "image/webp" => Some(ImageFormat::Webp),
        _ => None,
    }
}

fn classify_converse_error(service_error: ConverseError) -> GenerationError {
    if let ConverseError::ValidationException(validation) = &service_error {
        let message = validation.message().unwrap_or_default();
        if is_input_too_large(message) {
            warn!(message, "model rejected input as too large");
            return GenerationError::InputTooLarge(message.to_string());
        }
    }
    GenerationError::Invocation(service_error.to_string())
}

pub fn is_input_too_large(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    INPUT_TOO_LARGE_HINTS.iter().any(|hint| message.contains(hint))
}
