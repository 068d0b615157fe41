use std::collections::VecDeque;
use std::pin::Pin;

use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::common::Message;
use crate::config::AssistantConfig;
use crate::error::AssistantError;

/// Stream of reply text fragments, in arrival order.
pub type ReplyStream = BoxStream<'static, Result<String, AssistantError>>;

/// Hosted conversational provider.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Starts answering `history`; the last entry is the newest user message.
    async fn reply(&self, history: Vec<Message>) -> Result<ReplyStream, AssistantError>;
}

/// OpenAI-compatible chat-completions client.
#[derive(Clone)]
pub struct OpenAiAssistant {
    client: Client,
    config: AssistantConfig,
}

impl OpenAiAssistant {
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn build_request<'a>(&'a self, history: &'a [Message]) -> ChatCompletionRequest<'a> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage {
            role: "system",
            content: &self.config.instructions,
        });
        messages.extend(history.iter().map(|message| ChatMessage {
            role: message.role().as_str(),
            content: message.content(),
        }));

        ChatCompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            stream: true,
        }
    }
}

#[async_trait]
impl Assistant for OpenAiAssistant {
    async fn reply(&self, history: Vec<Message>) -> Result<ReplyStream, AssistantError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AssistantError::MissingApiKey)?;

        let body = self.build_request(&history);
        log::info!(
            "Requesting {} reply for {} messages",
            self.config.model,
            history.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(AssistantError::Status { status, body });
        }

        Ok(delta_stream(response.bytes_stream()))
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}

#[derive(Debug)]
enum SseItem {
    Delta(String),
    Done,
}

/// Splits a server-sent-event byte stream into completion deltas.
#[derive(Debug, Default)]
struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    fn push(&mut self, chunk: &[u8]) -> Result<Vec<SseItem>, AssistantError> {
        self.buffer.extend_from_slice(chunk);
        let mut items = Vec::new();

        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let Some(data) = line.trim().strip_prefix("data:") else {
                continue;
            };
            let data = data.trim();
            if data == "[DONE]" {
                items.push(SseItem::Done);
                break;
            }

            let chunk: ChatCompletionChunk = serde_json::from_str(data)?;
            items.extend(
                chunk
                    .choices
                    .into_iter()
                    .filter_map(|choice| choice.delta.content)
                    .filter(|content| !content.is_empty())
                    .map(SseItem::Delta),
            );
        }

        Ok(items)
    }
}

struct DecodeState<S> {
    bytes: Pin<Box<S>>,
    decoder: SseDecoder,
    pending: VecDeque<Result<String, AssistantError>>,
    finished: bool,
}

fn delta_stream<S, B>(bytes: S) -> ReplyStream
where
    S: Stream<Item = reqwest::Result<B>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
{
    let state = DecodeState {
        bytes: Box::pin(bytes),
        decoder: SseDecoder::default(),
        pending: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                return Some((item, state));
            }
            if state.finished {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => match state.decoder.push(chunk.as_ref()) {
                    Ok(items) => {
                        for item in items {
                            match item {
                                SseItem::Delta(text) => state.pending.push_back(Ok(text)),
                                SseItem::Done => state.finished = true,
                            }
                        }
                    }
                    Err(err) => {
                        state.pending.push_back(Err(err));
                        state.finished = true;
                    }
                },
                Some(Err(err)) => {
                    state.pending.push_back(Err(err.into()));
                    state.finished = true;
                }
                None => state.finished = true,
            }
        }
    })
    .boxed()
}
