//! The CSV analysis agent.
//!
//! Holds the loaded table and a bounded conversation memory, builds the
//! model prompt, and converts provider failures into reply text at the
//! boundary: asking a question never returns an error.

use crate::providers::ChatProvider;
use crate::table::CsvTable;
use serde::Serialize;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info};

/// Fixed reply when no file is loaded.
pub const NO_FILE_LOADED: &str = "Nenhum arquivo carregado.";

const SYSTEM_PROMPT: &str = "\
Você é um agente fiscal especializado em análise de arquivos CSV.
Responda apenas perguntas relacionadas aos dados do arquivo CSV carregado.
Se a pergunta não for sobre o conteúdo do CSV, responda exatamente:
\"Sou exclusivamente um agente fiscal que lê e analisa arquivos CSV. Por favor, faça perguntas relacionadas aos dados carregados.\"
Sempre responda em português do Brasil.
Ao analisar os dados, seja claro e objetivo.
Quando a resposta for uma tabela, uma série ou um resumo estatístico, responda somente com JSON (uma lista de objetos ou um objeto), sem texto adicional; um bloco de código é aceitável.
Para respostas que não são tabulares, responda em texto simples.
O arquivo CSV já está carregado e descrito abaixo; não tente carregá-lo novamente.";

/// How the answer text is nested inside a reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplyOutput {
    /// Fixed messages: the output is the text itself.
    Text(String),
    /// A full conversation turn.
    Turn { input: String, output: String },
}

/// One agent reply. For turns the answer text is reachable as
/// `output.output`; fixed messages sit directly under `output`, matching
/// what the browser frontend expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentReply {
    pub output: ReplyOutput,
}

impl AgentReply {
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            output: ReplyOutput::Text(text.into()),
        }
    }

    pub fn turn(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            output: ReplyOutput::Turn {
                input: input.into(),
                output: output.into(),
            },
        }
    }

    /// The answer text, regardless of nesting.
    pub fn answer_text(&self) -> &str {
        match &self.output {
            ReplyOutput::Text(text) => text,
            ReplyOutput::Turn { output, .. } => output,
        }
    }
}

/// Agent tuning knobs.
#[derive(Debug, Clone, serde::Deserialize, Serialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Conversation turns kept as prompt context
    pub history_turns: usize,
    /// Sample rows shown to the model
    pub sample_rows: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            history_turns: 6,
            sample_rows: 8,
        }
    }
}

struct HistoryTurn {
    question: String,
    answer: String,
}

/// The question-answering agent over one loaded CSV file.
pub struct AnalysisAgent {
    provider: Box<dyn ChatProvider>,
    config: AgentConfig,
    table: RwLock<Option<CsvTable>>,
    history: Mutex<VecDeque<HistoryTurn>>,
}

impl AnalysisAgent {
    pub fn new(provider: Box<dyn ChatProvider>, config: AgentConfig) -> Self {
        Self {
            provider,
            config,
            table: RwLock::new(None),
            history: Mutex::new(VecDeque::new()),
        }
    }

    /// Load a CSV file and reset the conversation. Returns the resolved
    /// path the table was read from.
    pub async fn load_file(&self, path: impl AsRef<Path>) -> crate::error::Result<PathBuf> {
        let table = CsvTable::load(path)?;
        let resolved = table.path().to_path_buf();
        info!(
            file = %resolved.display(),
            rows = table.row_count(),
            columns = table.headers().len(),
            "arquivo CSV carregado"
        );
        *self.table.write().await = Some(table);
        self.history.lock().await.clear();
        Ok(resolved)
    }

    /// Path of the currently loaded file, if any.
    pub async fn current_file(&self) -> Option<PathBuf> {
        self.table
            .read()
            .await
            .as_ref()
            .map(|table| table.path().to_path_buf())
    }

    /// Answer one question about the loaded table.
    ///
    /// Provider failures become reply text; this never returns an error.
    pub async fn ask(&self, question: &str) -> AgentReply {
        let table = self.table.read().await;
        let Some(table) = table.as_ref() else {
            return AgentReply::message(NO_FILE_LOADED);
        };

        let user_prompt = self.build_user_prompt(table, question).await;
        match self.provider.chat(SYSTEM_PROMPT, &user_prompt).await {
            Ok(answer) => {
                self.remember(question, &answer).await;
                AgentReply::turn(question, answer)
            }
            Err(err) => {
                error!(error = %err, "falha ao processar a pergunta");
                AgentReply::message(format!("Erro ao processar a pergunta: {err}"))
            }
        }
    }

    async fn build_user_prompt(&self, table: &CsvTable, question: &str) -> String {
        let mut prompt = String::new();
        prompt.push_str(&format!("Arquivo: {}\n", table.path().display()));
        prompt.push_str(&format!("Linhas: {}\n", table.row_count()));
        prompt.push_str("Colunas:\n");
        prompt.push_str(&table.schema_summary());
        prompt.push_str("\nAmostra dos dados:\n");
        prompt.push_str(&table.sample_rows(self.config.sample_rows));

        let history = self.history.lock().await;
        if !history.is_empty() {
            prompt.push_str("\nConversa anterior:\n");
            for turn in history.iter() {
                prompt.push_str(&format!("P: {}\nR: {}\n", turn.question, turn.answer));
            }
        }

        prompt.push_str(&format!("\nPergunta: {question}"));
        prompt
    }

    async fn remember(&self, question: &str, answer: &str) {
        let mut history = self.history.lock().await;
        history.push_back(HistoryTurn {
            question: question.to_string(),
            answer: answer.to_string(),
        });
        while history.len() > self.config.history_turns {
            history.pop_front();
        }
    }
}
