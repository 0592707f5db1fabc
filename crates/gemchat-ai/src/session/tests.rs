//! Session behavior against a scripted provider.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gemchat_common::{ContextPolicy, SessionId, SystemInstructionMode};

use super::*;
use crate::render::render_turn;
use crate::{
    AiError, AiResponse, GenerationRequest, Part, PartKind, Role, TextGenerationProvider,
    TokenUsage, Turn,
};

/// Replays queued responses and records every request it sees.
#[derive(Default)]
struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<AiResponse, AiError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    ended: Mutex<Vec<SessionId>>,
}

impl ScriptedProvider {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn reply(&self, text: &str) {
        self.push(Ok(AiResponse::text(text)));
    }

    fn push(&self, reply: Result<AiResponse, AiError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn ended(&self) -> usize {
        self.ended.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerationProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<AiResponse, AiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AiError::ApiError("no scripted reply".into())))
    }

    fn end_session(&self, session: &SessionId) {
        self.ended.lock().unwrap().push(session.clone());
    }
}

fn plain_session(provider: &Arc<ScriptedProvider>) -> ConversationSession {
    ConversationSession::create(provider.clone(), "test-model", None, SystemInstructionMode::None)
        .unwrap()
}

fn roles(history: &[Turn]) -> Vec<Role> {
    history.iter().map(Turn::role).collect()
}

#[tokio::test]
async fn send_appends_user_and_model_turns() {
    let provider = ScriptedProvider::new();
    provider.reply("hello there");
    provider.reply("still here");
    let mut session = plain_session(&provider);

    let reply = session.send("hi").await.unwrap();
    assert_eq!(reply.role(), Role::Model);
    assert_eq!(reply.content(), "hello there");
    assert_eq!(session.turn_count(), 2);

    session.send("again").await.unwrap();
    assert_eq!(session.turn_count(), 4);
    assert_eq!(
        roles(session.history()),
        vec![Role::User, Role::Model, Role::User, Role::Model]
    );
    assert_eq!(session.history()[2].content(), "again");
}

#[tokio::test]
async fn empty_and_termination_input_touch_nothing() {
    let provider = ScriptedProvider::new();
    let mut session = plain_session(&provider);

    for input in ["", "   ", "\n", "exit", "quit"] {
        let err = session.send(input).await.unwrap_err();
        assert!(matches!(err, SessionError::EmptyInput), "input {input:?}");
    }
    assert_eq!(session.turn_count(), 0);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn termination_match_is_exact() {
    let provider = ScriptedProvider::new();
    provider.reply("ok");
    let mut session = plain_session(&provider);

    session.send("Exit").await.unwrap();
    assert_eq!(session.turn_count(), 2);
    assert!(!is_termination_token("exit "));
    assert!(is_termination_token("quit"));
}

#[tokio::test]
async fn native_mode_keeps_instruction_out_of_transcript() {
    let provider = ScriptedProvider::new();
    provider.reply("4");
    let mut session = ConversationSession::create(
        provider.clone(),
        "test-model",
        Some("You are a calculator."),
        SystemInstructionMode::Native,
    )
    .unwrap();
    assert_eq!(session.system_instruction(), Some("You are a calculator."));
    assert!(session.history().is_empty());

    session.send("2+2").await.unwrap();

    let history = session.history();
    assert_eq!(roles(history), vec![Role::User, Role::Model]);
    assert_eq!(history[0].content(), "2+2");
    assert_eq!(history[1].content(), "4");

    let sent = &provider.requests()[0];
    assert_eq!(sent.system_instruction.as_deref(), Some("You are a calculator."));
    assert_eq!(sent.contents.len(), 1);
    assert!(sent.contents.iter().all(|t| t.role() != Role::System));
}

#[tokio::test]
async fn simulated_mode_seeds_instruction_as_user_turn() {
    let provider = ScriptedProvider::new();
    provider.reply("Meow.");
    let mut session = ConversationSession::create(
        provider.clone(),
        "test-model",
        Some("Talk like a cat."),
        SystemInstructionMode::Simulated,
    )
    .unwrap();

    assert_eq!(session.turn_count(), 1);
    assert_eq!(session.history()[0].role(), Role::User);
    assert_eq!(session.history()[0].content(), "Talk like a cat.");
    assert_eq!(session.system_instruction(), None);
    assert_eq!(provider.call_count(), 0);

    session.send("hello").await.unwrap();
    let sent = &provider.requests()[0];
    assert!(sent.system_instruction.is_none());
    let texts: Vec<&str> = sent.contents.iter().map(Turn::content).collect();
    assert_eq!(texts, vec!["Talk like a cat.", "hello"]);
}

#[test]
fn none_mode_ignores_instruction() {
    let provider = ScriptedProvider::new();
    let session = ConversationSession::create(
        provider,
        "test-model",
        Some("ignored"),
        SystemInstructionMode::None,
    )
    .unwrap();
    assert!(session.history().is_empty());
    assert_eq!(session.system_instruction(), None);
}

#[test]
fn instruction_modes_require_text() {
    for mode in [SystemInstructionMode::Native, SystemInstructionMode::Simulated] {
        let provider = ScriptedProvider::new();
        let err = ConversationSession::create(provider.clone(), "m", None, mode).unwrap_err();
        assert!(matches!(err, SessionError::MissingSystemInstruction(m) if m == mode));

        let err = ConversationSession::create(provider, "m", Some("  "), mode).unwrap_err();
        assert!(matches!(err, SessionError::MissingSystemInstruction(_)));
    }
}

#[tokio::test]
async fn provider_error_rolls_back_user_turn() {
    let provider = ScriptedProvider::new();
    provider.reply("first");
    provider.push(Err(AiError::RateLimited));
    provider.reply("third");
    let mut session = plain_session(&provider);

    session.send("one").await.unwrap();
    let err = session.send("two").await.unwrap_err();
    assert!(matches!(err, SessionError::Provider(AiError::RateLimited)));
    assert_eq!(session.turn_count(), 2);
    assert_eq!(provider.call_count(), 2);

    session.send("three").await.unwrap();
    let texts: Vec<&str> = session.history().iter().map(Turn::content).collect();
    assert_eq!(texts, vec!["one", "first", "three", "third"]);
}

#[tokio::test]
async fn failed_call_is_not_counted_in_usage() {
    let provider = ScriptedProvider::new();
    provider.push(Ok(AiResponse {
        parts: vec![Part::text("ok")],
        usage: TokenUsage {
            input_tokens: 7,
            output_tokens: 2,
        },
    }));
    provider.push(Err(AiError::Timeout));
    let mut session = plain_session(&provider);

    session.send("a").await.unwrap();
    session.send("b").await.unwrap_err();

    assert_eq!(session.tracker().call_count(), 1);
    assert_eq!(session.tracker().total_tokens(), 9);
}

#[tokio::test]
async fn close_is_idempotent_and_blocks_send() {
    let provider = ScriptedProvider::new();
    provider.reply("hi");
    let mut session = plain_session(&provider);
    session.send("hello").await.unwrap();

    session.close();
    session.close();
    assert!(session.is_closed());
    assert_eq!(provider.ended(), 1);

    let err = session.send("more").await.unwrap_err();
    assert!(matches!(err, SessionError::Closed));
    assert_eq!(session.turn_count(), 2);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn full_context_sends_whole_transcript() {
    let provider = ScriptedProvider::new();
    provider.reply("a1");
    provider.reply("a2");
    let mut session = plain_session(&provider);
    assert_eq!(session.context_policy(), ContextPolicy::Full);

    session.send("q1").await.unwrap();
    session.send("q2").await.unwrap();

    let requests = provider.requests();
    let texts: Vec<&str> = requests[1]
        .contents
        .iter()
        .map(Turn::content)
        .collect();
    assert_eq!(texts, vec!["q1", "a1", "q2"]);
}

#[tokio::test]
async fn latest_context_sends_seed_and_newest_utterance() {
    let provider = ScriptedProvider::new();
    provider.reply("a1");
    provider.reply("a2");
    let mut session = ConversationSession::builder(provider.clone(), "test-model")
        .mode(SystemInstructionMode::Simulated)
        .system_instruction("seed")
        .context_policy(ContextPolicy::Latest)
        .build()
        .unwrap();

    session.send("q1").await.unwrap();
    session.send("q2").await.unwrap();

    let requests = provider.requests();
    let texts: Vec<&str> = requests[1]
        .contents
        .iter()
        .map(Turn::content)
        .collect();
    assert_eq!(texts, vec!["seed", "q2"]);
    assert_eq!(session.turn_count(), 5);
}

#[tokio::test]
async fn builder_passes_generation_config() {
    let provider = ScriptedProvider::new();
    provider.reply("ok");
    let config = crate::GenerationConfig {
        max_output_tokens: 128,
        temperature: 0.1,
        code_execution: true,
    };
    let mut session = ConversationSession::builder(provider.clone(), "gemini-x")
        .generation_config(config.clone())
        .build()
        .unwrap();

    session.send("hi").await.unwrap();
    let sent = &provider.requests()[0];
    assert_eq!(sent.model, "gemini-x");
    assert_eq!(sent.config, config);
}

#[tokio::test]
async fn code_execution_reply_renders_code_then_result() {
    let provider = ScriptedProvider::new();
    provider.push(Ok(AiResponse {
        parts: vec![
            Part::text("Counting."),
            Part::ExecutableCode {
                language: "PYTHON".into(),
                code: "print('strawberry'.count('r'))".into(),
            },
            Part::CodeExecutionResult {
                outcome: "OUTCOME_OK".into(),
                output: "3\n".into(),
            },
        ],
        usage: TokenUsage::default(),
    }));
    let mut session = plain_session(&provider);

    let reply = session.send("How many r's in strawberry?").await.unwrap();
    assert_eq!(reply.content(), "Counting.");

    let rendered = render_turn(&reply);
    let kinds: Vec<PartKind> = rendered.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![PartKind::Text, PartKind::Code, PartKind::ExecutionResult]
    );
    assert_eq!(rendered[1].to_string(), "Code:\nprint('strawberry'.count('r'))");
    assert_eq!(rendered[2].to_string(), "Execution Result:\n3\n");
}

#[tokio::test]
async fn dropped_send_leaves_no_dangling_turn() {
    struct Stalled;

    #[async_trait]
    impl TextGenerationProvider for Stalled {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn generate(&self, _request: &GenerationRequest) -> Result<AiResponse, AiError> {
            std::future::pending().await
        }
    }

    let mut session =
        ConversationSession::create(Arc::new(Stalled), "m", None, SystemInstructionMode::None)
            .unwrap();

    let attempt = tokio::time::timeout(std::time::Duration::from_millis(20), session.send("hi"));
    assert!(attempt.await.is_err());
    assert!(session.history().is_empty());
}
