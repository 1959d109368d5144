// ABOUTME: The command front end object
// ABOUTME: Holds the store client and the command-name to handler table; dispatches one message at a time

use std::collections::HashMap;
use std::sync::Arc;

use crate::client::{TaskApi, TaskClient};
use crate::commands::parse_command_line;
use crate::config::BotConfig;
use crate::handlers::{
    CommandHandler, CompleteHandler, CreateHandler, DeleteHandler, HelpHandler, ListHandler,
    StartHandler, UpdateHandler, ViewHandler,
};

/// Built once at startup and shared by every message; holds no mutable state
pub struct FrontEnd {
    api: Arc<dyn TaskApi>,
    handlers: HashMap<&'static str, Box<dyn CommandHandler>>,
}

impl FrontEnd {
    pub fn new(config: &BotConfig) -> Self {
        Self::with_api(Arc::new(TaskClient::new(config.api_base_url.clone())))
    }

    pub fn with_api(api: Arc<dyn TaskApi>) -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn CommandHandler>> = HashMap::new();
        handlers.insert("start", Box::new(StartHandler));
        handlers.insert("help", Box::new(HelpHandler));
        handlers.insert("create", Box::new(CreateHandler));
        handlers.insert("list", Box::new(ListHandler));
        handlers.insert("view", Box::new(ViewHandler));
        handlers.insert("update", Box::new(UpdateHandler));
        handlers.insert("complete", Box::new(CompleteHandler));
        handlers.insert("delete", Box::new(DeleteHandler));

        Self { api, handlers }
    }

    /// Names of the commands this front end answers
    pub fn commands(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    /// Reply to one message, or `None` when it is not a recognized command
    pub async fn handle_message(&self, text: &str) -> Option<String> {
        let command = parse_command_line(text)?;
        let handler = self.handlers.get(command.name.as_str())?;
        Some(handler.handle(self.api.as_ref(), &command.args).await)
    }
}
