//! Function-calling loop with per-chat conversation memory.

use std::sync::Arc;

use anyhow::Result;
use llm_client::{LlmClient, ToolSpec};
use prompt::{ChatMessage, ToolCall};
use storage::{history_key, ChatHistoryStore, HistoryEntry, HistoryRole};
use tracing::{debug, info, instrument, warn};

use crate::tool::{parse_tool_input, Tool};

/// Final answer when the model keeps calling tools past the iteration budget.
pub const ITERATION_LIMIT_ANSWER: &str = "Agent stopped due to iteration limit or time limit.";

const DEFAULT_MEMORY_WINDOW: usize = 10;
const DEFAULT_MAX_ITERATIONS: usize = 5;

pub struct AgentExecutor {
    llm: Arc<dyn LlmClient>,
    tools: Vec<Arc<dyn Tool>>,
    history: Arc<dyn ChatHistoryStore>,
    system_prompt: String,
    memory_window: usize,
    max_iterations: usize,
}

impl AgentExecutor {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        history: Arc<dyn ChatHistoryStore>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            tools: Vec::new(),
            history,
            system_prompt: system_prompt.into(),
            memory_window: DEFAULT_MEMORY_WINDOW,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Number of history entries sent with every request.
    pub fn with_memory_window(mut self, memory_window: usize) -> Self {
        self.memory_window = memory_window;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Entries remembered for the chat.
    pub async fn history_len(&self, chat_id: Option<&str>) -> Result<usize> {
        Ok(self.history.count(&history_key(chat_id)).await?)
    }

    /// Runs one user turn and returns the final answer text.
    ///
    /// The input and the answer are remembered only when the turn completes.
    #[instrument(skip(self, input), fields(input_len = input.len()))]
    pub async fn run(&self, chat_id: Option<&str>, input: &str) -> Result<String> {
        let key = history_key(chat_id);
        let mut messages = self.initial_messages(&key, input).await?;
        let specs: Vec<ToolSpec> = self.tools.iter().map(|t| t.spec()).collect();

        let mut answer = None;
        for iteration in 0..self.max_iterations {
            let reply = self.llm.chat(&messages, &specs).await?;
            if !reply.has_tool_calls() {
                answer = Some(reply.text_or_empty().to_string());
                break;
            }

            debug!(
                iteration,
                tool_calls = reply.tool_calls.len(),
                "Model requested tools"
            );
            messages.push(ChatMessage::assistant_tool_calls(
                reply.text_or_empty(),
                reply.tool_calls.clone(),
            ));
            for call in &reply.tool_calls {
                let observation = self.execute_tool(call).await;
                messages.push(ChatMessage::tool(call.id.clone(), observation));
            }
        }

        let answer = answer.unwrap_or_else(|| {
            warn!(max_iterations = self.max_iterations, "Agent hit iteration limit");
            ITERATION_LIMIT_ANSWER.to_string()
        });

        self.history.append(&key, HistoryEntry::user(input)).await?;
        self.history
            .append(&key, HistoryEntry::assistant(answer.clone()))
            .await?;
        info!(history_key = %key, answer_len = answer.len(), "Agent answered");
        Ok(answer)
    }

    async fn initial_messages(&self, key: &str, input: &str) -> Result<Vec<ChatMessage>> {
        let remembered = self.history.recent(key, self.memory_window).await?;
        let mut messages = Vec::with_capacity(remembered.len() + 2);
        messages.push(ChatMessage::system(self.system_prompt.clone()));
        messages.extend(remembered.into_iter().map(|entry| match entry.role {
            HistoryRole::User => ChatMessage::user(entry.content),
            HistoryRole::Assistant => ChatMessage::assistant(entry.content),
        }));
        messages.push(ChatMessage::user(input));
        Ok(messages)
    }

    /// Runs one tool call; failures become observations so the model can recover.
    async fn execute_tool(&self, call: &ToolCall) -> String {
        let Some(tool) = self.tools.iter().find(|t| t.name() == call.name) else {
            warn!(tool = %call.name, "Model called unknown tool");
            return format!(
                "{} is not a valid tool, try one of [{}].",
                call.name,
                self.tool_names().join(", ")
            );
        };
        let input = parse_tool_input(&call.arguments);
        match tool.run(&input).await {
            Ok(output) => {
                info!(tool = %call.name, output_len = output.len(), "Tool finished");
                output
            }
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Tool failed");
                format!("Error: {}", e)
            }
        }
    }
}
