//! Response dispatcher: one state-machine transition per inbound message.
//!
//! Reads the user's active section, optionally grounds the question in
//! retrieved documents, assembles the prompt, calls the completion
//! provider once and delivers the result (or a degraded message) back
//! through the transport. Neither the retriever nor the provider is
//! ever retried; delivery gets exactly one plain-text retry.

use std::sync::Arc;

use crate::content::{texts, ReferenceData};
use crate::errors::DeliveryError;
use crate::llm::CompletionProvider;
use crate::prompt;
use crate::retrieval::Retriever;
use crate::section::{RagDomain, Section};
use crate::session::SessionStore;
use crate::transport::{split_message, ChatTransport, MAX_MESSAGE_LEN};

pub struct Dispatcher {
    sessions: Arc<SessionStore>,
    retriever: Arc<Retriever>,
    llm: Arc<dyn CompletionProvider>,
    reference: Arc<ReferenceData>,
}

impl Dispatcher {
    pub fn new(
        sessions: Arc<SessionStore>,
        retriever: Arc<Retriever>,
        llm: Arc<dyn CompletionProvider>,
        reference: Arc<ReferenceData>,
    ) -> Self {
        Self {
            sessions,
            retriever,
            llm,
            reference,
        }
    }

    /// Handle one free-text message from a user.
    pub async fn handle_text(
        &self,
        user_id: i64,
        chat_id: i64,
        text: &str,
        transport: &dyn ChatTransport,
    ) {
        let session = self.sessions.get(user_id);

        let grounding = match session.section.rag_domain() {
            Some(domain) => match self.retriever.query(domain, text).await {
                Ok(docs) => docs,
                Err(err) => {
                    tracing::warn!(
                        "Retrieval for '{}' degraded to empty grounding: {}",
                        session.section.as_str(),
                        err
                    );
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let prompt = prompt::assemble(text, session.section, &session.content, &grounding);

        match self.llm.complete(&prompt).await {
            Ok(answer) => self.deliver(chat_id, &answer, true, transport).await,
            Err(err) => {
                tracing::warn!("Generation failed: {}", err);
                let message = err
                    .user_message()
                    .unwrap_or_else(|| texts::NO_RESPONSE_TEXT.to_string());
                self.deliver(chat_id, &message, false, transport).await;
            }
        }
    }

    /// Activate a section for a user and deliver its reference text.
    pub async fn select_section(
        &self,
        user_id: i64,
        chat_id: i64,
        section: Section,
        transport: &dyn ChatTransport,
    ) {
        self.sessions
            .set(user_id, section, section.static_content());
        let reply = self.section_reply(section);
        self.deliver(chat_id, &reply, true, transport).await;
    }

    fn section_reply(&self, section: Section) -> String {
        let Some(domain) = section.rag_domain() else {
            return section.static_content().to_string();
        };

        let intro = match domain {
            RagDomain::Races => texts::RACES_INTRO_TEXT,
            RagDomain::Spells => texts::SPELLS_INTRO_TEXT,
            RagDomain::Classes => texts::CLASSES_INTRO_TEXT,
        };

        let names = self.reference.names(domain);
        if names.is_empty() {
            intro.to_string()
        } else {
            format!("{}\n\nВ справочнике: {}.", intro, names.join(", "))
        }
    }

    /// Deliver outbound text, segmented to the transport limit.
    ///
    /// Formatting rejections get one retry with plain truncated text;
    /// if that fails too, a generic apology is sent and delivery of the
    /// remaining segments stops.
    pub async fn deliver(
        &self,
        chat_id: i64,
        text: &str,
        formatted: bool,
        transport: &dyn ChatTransport,
    ) {
        for segment in split_message(text, MAX_MESSAGE_LEN) {
            match transport.send_text(chat_id, &segment, formatted).await {
                Ok(()) => continue,
                Err(DeliveryError::Format(reason)) => {
                    tracing::warn!("Formatted delivery rejected, retrying plain: {}", reason);
                    let fallback = truncate_chars(&segment, MAX_MESSAGE_LEN);
                    if let Err(err) = transport.send_text(chat_id, &fallback, false).await {
                        tracing::error!("Plain delivery retry failed: {}", err);
                        if let Err(err) = transport
                            .send_text(chat_id, texts::DELIVERY_APOLOGY_TEXT, false)
                            .await
                        {
                            tracing::error!("Apology delivery failed: {}", err);
                        }
                        return;
                    }
                }
                Err(err) => {
                    tracing::error!("Delivery failed: {}", err);
                    return;
                }
            }
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::errors::{EmbeddingError, GenerationError};
    use crate::llm::EmbeddingProvider;
    use crate::retrieval::SqliteVectorIndex;

    #[derive(Debug, Clone, PartialEq)]
    struct Sent {
        chat_id: i64,
        text: String,
        formatted: bool,
    }

    /// Transport double that records sends and fails on demand.
    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<Sent>>,
        /// Errors popped in order, one per `send_text` call.
        failures: Mutex<Vec<DeliveryError>>,
    }

    impl RecordingTransport {
        fn with_failures(failures: Vec<DeliveryError>) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                failures: Mutex::new(failures),
            }
        }

        fn sent(&self) -> Vec<Sent> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatTransport for RecordingTransport {
        async fn send_text(
            &self,
            chat_id: i64,
            text: &str,
            formatted: bool,
        ) -> Result<(), DeliveryError> {
            let mut failures = self.failures.lock().unwrap();
            if !failures.is_empty() {
                return Err(failures.remove(0));
            }
            drop(failures);

            self.sent.lock().unwrap().push(Sent {
                chat_id,
                text: text.to_string(),
                formatted,
            });
            Ok(())
        }
    }

    /// Completion double that records prompts and replays a canned result.
    struct ScriptedLlm {
        prompts: Mutex<Vec<String>>,
        result: Result<String, GenerationError>,
    }

    impl ScriptedLlm {
        fn ok(text: &str) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                result: Ok(text.to_string()),
            }
        }

        fn err(err: GenerationError) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                result: Err(err),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedLlm {
        async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.result {
                Ok(text) => Ok(text.clone()),
                Err(GenerationError::Connectivity(e)) => {
                    Err(GenerationError::Connectivity(e.clone()))
                }
                Err(GenerationError::BadStatus(s)) => Err(GenerationError::BadStatus(*s)),
                Err(GenerationError::Other(e)) => Err(GenerationError::Other(e.clone())),
            }
        }
    }

    /// Embedder double that counts calls.
    struct CountingEmbedder {
        calls: Mutex<usize>,
        vector: Vec<f32>,
    }

    impl CountingEmbedder {
        fn new(vector: Vec<f32>) -> Self {
            Self {
                calls: Mutex::new(0),
                vector,
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl EmbeddingProvider for CountingEmbedder {
        async fn embed(&self, _input: &str) -> Result<Vec<f32>, EmbeddingError> {
            *self.calls.lock().unwrap() += 1;
            Ok(self.vector.clone())
        }
    }

    struct Fixture {
        dispatcher: Dispatcher,
        sessions: Arc<SessionStore>,
        llm: Arc<ScriptedLlm>,
        embedder: Arc<CountingEmbedder>,
        _dir: tempfile::TempDir,
    }

    async fn fixture(llm: ScriptedLlm, seed_races: bool) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        if seed_races {
            let index = SqliteVectorIndex::create(dir.path().join("races.db"))
                .await
                .unwrap();
            index
                .insert("elf", "Эльфы — долгоживущий народ.", &[1.0, 0.0])
                .await
                .unwrap();
            index
                .insert("high-elf", "Высшие эльфы владеют заговором.", &[0.9, 0.1])
                .await
                .unwrap();
        }

        let sessions = Arc::new(SessionStore::new());
        let embedder = Arc::new(CountingEmbedder::new(vec![1.0, 0.0]));
        let embedder_dyn: Arc<dyn EmbeddingProvider> = embedder.clone();
        let retriever = Arc::new(Retriever::new(dir.path(), embedder_dyn, 5));
        let llm = Arc::new(llm);
        let llm_dyn: Arc<dyn CompletionProvider> = llm.clone();
        let reference = Arc::new(ReferenceData::new(dir.path()));

        Fixture {
            dispatcher: Dispatcher::new(sessions.clone(), retriever, llm_dyn, reference),
            sessions,
            llm,
            embedder,
            _dir: dir,
        }
    }

    #[tokio::test]
    async fn non_rag_section_never_queries_retrieval() {
        let fx = fixture(ScriptedLlm::ok("Ответ."), true).await;
        let transport = RecordingTransport::default();

        fx.dispatcher.handle_text(1, 1, "что такое DC?", &transport).await;

        assert_eq!(fx.embedder.calls(), 0);
        let prompts = fx.llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(!prompts[0].contains("СПРАВОЧНЫЕ МАТЕРИАЛЫ"));
        assert!(prompts[0].contains(texts::RULES_TEXT));
    }

    #[tokio::test]
    async fn races_round_trip_grounds_and_delivers_formatted() {
        let fx = fixture(ScriptedLlm::ok("Эльфы — долгоживущий народ..."), true).await;
        let transport = RecordingTransport::default();

        fx.sessions.set(5, Section::Races, "");
        fx.dispatcher
            .handle_text(5, 50, "Расскажи про эльфов", &transport)
            .await;

        let prompts = fx.llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Эльфы — долгоживущий народ."));
        assert!(prompts[0].contains("Высшие эльфы владеют заговором."));
        assert!(prompts[0].contains(texts::PROMPT_INSTRUCTIONS));

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].chat_id, 50);
        assert!(sent[0].formatted);
        assert_eq!(sent[0].text, "Эльфы — долгоживущий народ...");
    }

    #[tokio::test]
    async fn uninitialized_domain_falls_back_to_plain_prompt() {
        // No races.db seeded: retrieval is unavailable for the domain.
        let fx = fixture(ScriptedLlm::ok("Ответ."), false).await;
        let transport = RecordingTransport::default();

        fx.sessions.set(2, Section::Races, "");
        fx.dispatcher.handle_text(2, 20, "про эльфов", &transport).await;

        let prompts = fx.llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(!prompts[0].contains("СПРАВОЧНЫЕ МАТЕРИАЛЫ"));
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn connectivity_failure_delivers_fixed_friendly_text() {
        let fx = fixture(
            ScriptedLlm::err(GenerationError::Connectivity("refused".to_string())),
            false,
        )
        .await;
        let transport = RecordingTransport::default();

        fx.dispatcher.handle_text(3, 30, "вопрос", &transport).await;

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].text, texts::GENERATION_UNREACHABLE_TEXT);
        assert!(!sent[0].formatted);
    }

    #[tokio::test]
    async fn bad_status_delivers_dispatcher_owned_message() {
        let fx = fixture(ScriptedLlm::err(GenerationError::BadStatus(500)), false).await;
        let transport = RecordingTransport::default();

        fx.dispatcher.handle_text(3, 30, "вопрос", &transport).await;

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].text, texts::NO_RESPONSE_TEXT);
    }

    #[tokio::test]
    async fn oversized_answer_is_split_in_order() {
        let long_answer = (0..400)
            .map(|i| format!("строка ответа {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        assert!(long_answer.chars().count() > MAX_MESSAGE_LEN);

        let fx = fixture(ScriptedLlm::ok(&long_answer), false).await;
        let transport = RecordingTransport::default();

        fx.dispatcher.handle_text(4, 40, "вопрос", &transport).await;

        let sent = transport.sent();
        assert!(sent.len() >= 2);
        for message in &sent {
            assert!(message.text.chars().count() <= MAX_MESSAGE_LEN);
        }
        let reassembled: String = sent.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(reassembled, long_answer);
    }

    #[tokio::test]
    async fn format_rejection_retries_plain_then_apologizes() {
        let fx = fixture(ScriptedLlm::ok("<болтовня"), false).await;

        // First rejection only: the plain retry succeeds.
        let transport = RecordingTransport::with_failures(vec![DeliveryError::Format(
            "can't parse entities".to_string(),
        )]);
        fx.dispatcher.handle_text(6, 60, "вопрос", &transport).await;
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert!(!sent[0].formatted);
        assert_eq!(sent[0].text, "<болтовня");

        // Rejection twice in a row: generic apology follows.
        let transport = RecordingTransport::with_failures(vec![
            DeliveryError::Format("can't parse entities".to_string()),
            DeliveryError::Transport("boom".to_string()),
        ]);
        fx.dispatcher.handle_text(6, 60, "вопрос", &transport).await;
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].text, texts::DELIVERY_APOLOGY_TEXT);
        assert!(!sent[0].formatted);
    }

    #[tokio::test]
    async fn sessions_are_isolated_between_users() {
        let fx = fixture(ScriptedLlm::ok("Ответ."), true).await;
        let transport = RecordingTransport::default();

        fx.dispatcher
            .select_section(1, 10, Section::Races, &transport)
            .await;
        fx.dispatcher
            .select_section(2, 20, Section::Dice, &transport)
            .await;

        // User 1 queries a RAG section, user 2 does not.
        fx.dispatcher.handle_text(1, 10, "про эльфов", &transport).await;
        fx.dispatcher.handle_text(2, 20, "сколько граней у d20?", &transport).await;

        let prompts = fx.llm.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("СПРАВОЧНЫЕ МАТЕРИАЛЫ"));
        assert!(prompts[0].contains("\"races\""));
        assert!(!prompts[1].contains("СПРАВОЧНЫЕ МАТЕРИАЛЫ"));
        assert!(prompts[1].contains("\"dice\""));
    }

    #[tokio::test]
    async fn select_section_delivers_static_text_and_updates_session() {
        let fx = fixture(ScriptedLlm::ok("Ответ."), false).await;
        let transport = RecordingTransport::default();

        fx.dispatcher
            .select_section(9, 90, Section::Combat, &transport)
            .await;

        assert_eq!(fx.sessions.get(9).section, Section::Combat);
        assert_eq!(fx.sessions.get(9).content, texts::COMBAT_RULES_TEXT);

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].formatted);
        assert!(sent[0].text.contains("Бой"));
    }
}
