//! Builds the stores, tools, agent and handler chain from config.

use std::sync::Arc;

use agent::{AgentExecutor, ImageTool, SearchTool, SpeechTool, Tool, VideoMessageTool};
use anyhow::Result;
use dbot_core::{InMemoryMediaStore, MediaStore};
use handler_chain::HandlerChain;
use llm_client::{LlmClient, LlmConfig, OpenAILlmClient};
use media_client::{ImageGenerationClient, SpeechClient, TalkingVideoClient};
use prompt::build_system_prompt;
use storage::{ChatHistoryStore, InMemoryChatHistory, SqliteChatHistory};
use tracing::info;

use crate::config::{BotConfig, CompanionConfig, HistoryStoreKind};
use crate::handlers::{CompanionHandler, StartCommandHandler, UsageLimit, UsageLimitHandler};

/// Agent tools plus the optional voice tool.
pub struct Toolset {
    pub tools: Vec<Arc<dyn Tool>>,
    pub voice: Option<Arc<dyn Tool>>,
}

pub async fn build_history_store(config: &BotConfig) -> Result<Arc<dyn ChatHistoryStore>> {
    let store: Arc<dyn ChatHistoryStore> = match config.companion().history_store {
        HistoryStoreKind::Sqlite => Arc::new(SqliteChatHistory::new(config.database_url()).await?),
        HistoryStoreKind::Memory => Arc::new(InMemoryChatHistory::new()),
    };
    Ok(store)
}

/// Search only with a SerpAPI key; selfie and generate_image always; video with D-ID settings.
pub fn build_tools(config: &BotConfig, media: Arc<dyn MediaStore>) -> Toolset {
    let companion = config.companion();
    let llm = config.llm();
    let images = ImageGenerationClient::with_base_url(
        llm.api_key().to_string(),
        llm.base_url().to_string(),
    );

    let mut tools: Vec<Arc<dyn Tool>> = Vec::new();
    if let Some(key) = &companion.serpapi_api_key {
        tools.push(Arc::new(SearchTool::new(key.clone())));
    }
    tools.push(Arc::new(ImageTool::selfie(
        images.clone(),
        media.clone(),
        companion.selfie_prompt(),
    )));
    tools.push(Arc::new(ImageTool::generate_image(images, media.clone())));
    if let Some((key, source_url)) = companion.video() {
        let client = TalkingVideoClient::new(key.to_string(), source_url.to_string());
        tools.push(Arc::new(VideoMessageTool::new(client, media.clone())));
    }

    let voice = companion.voice().map(|(key, voice_id)| {
        let client = SpeechClient::new(key.to_string(), voice_id.to_string());
        Arc::new(SpeechTool::new(client, media.clone())) as Arc<dyn Tool>
    });

    Toolset { tools, voice }
}

/// Agent with the persona system prompt and the given tools.
pub fn build_executor(
    companion: &CompanionConfig,
    llm: Arc<dyn LlmClient>,
    history: Arc<dyn ChatHistoryStore>,
    tools: Vec<Arc<dyn Tool>>,
) -> Result<AgentExecutor> {
    let tool_names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
    let system_prompt = build_system_prompt(
        &companion.personality_text()?,
        companion.reply_language.as_deref(),
        &tool_names,
    );
    Ok(AgentExecutor::new(llm, history, system_prompt)
        .with_tools(tools)
        .with_memory_window(companion.memory_window_size)
        .with_max_iterations(companion.agent_max_iterations))
}

/// UsageLimitHandler -> StartCommandHandler -> CompanionHandler.
pub fn build_chain(
    companion: &CompanionConfig,
    executor: Arc<AgentExecutor>,
    media: Arc<dyn MediaStore>,
    voice: Option<Arc<dyn Tool>>,
) -> HandlerChain {
    let limit = UsageLimit {
        whitelist: companion.chat_ids.clone(),
        max_free_messages: companion.max_free_messages,
        bot_name: companion.bot_name(),
        deploy_url: companion.deploy_url.clone(),
    };
    HandlerChain::new()
        .add_handler(Arc::new(UsageLimitHandler::new(executor.clone(), limit)))
        .add_handler(Arc::new(StartCommandHandler))
        .add_handler(Arc::new(
            CompanionHandler::new(executor, media).with_voice(voice),
        ))
}

/// Full production assembly: OpenAI LLM, configured history store, in-memory media store.
pub async fn assemble(config: &BotConfig) -> Result<HandlerChain> {
    let llm: Arc<dyn LlmClient> = Arc::new(OpenAILlmClient::from_config(config.llm()));
    let history = build_history_store(config).await?;
    let media: Arc<dyn MediaStore> = Arc::new(InMemoryMediaStore::new());
    let Toolset { tools, voice } = build_tools(config, media.clone());

    info!(
        model = %config.llm().model(),
        personality = %config.companion().personality,
        history_store = ?config.companion().history_store,
        tools = ?tools.iter().map(|t| t.name().to_string()).collect::<Vec<_>>(),
        voice = voice.is_some(),
        "Assembling companion"
    );

    let executor = Arc::new(build_executor(config.companion(), llm, history, tools)?);
    Ok(build_chain(config.companion(), executor, media, voice))
}
