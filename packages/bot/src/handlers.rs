// ABOUTME: One handler per chat command
// ABOUTME: Each parses its arguments, makes at most one store call and renders the reply

use async_trait::async_trait;
use taskbot_core::TaskUpdateInput;
use tracing::{debug, info};

use crate::client::{NewTask, TaskApi};
use crate::commands::{parse_task_id, CreateArgs, UpdateArgs};
use crate::messages;
use crate::render;

#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Produce the reply for one invocation of the command
    async fn handle(&self, api: &dyn TaskApi, args: &[&str]) -> String;
}

pub struct StartHandler;

#[async_trait]
impl CommandHandler for StartHandler {
    async fn handle(&self, _api: &dyn TaskApi, _args: &[&str]) -> String {
        messages::WELCOME.to_string()
    }
}

pub struct HelpHandler;

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn handle(&self, _api: &dyn TaskApi, _args: &[&str]) -> String {
        messages::HELP.to_string()
    }
}

pub struct CreateHandler;

#[async_trait]
impl CommandHandler for CreateHandler {
    async fn handle(&self, api: &dyn TaskApi, args: &[&str]) -> String {
        let args = match CreateArgs::parse(args) {
            Ok(args) => args,
            Err(e) => {
                debug!("Rejected /create: {}", e);
                return messages::CREATE_USAGE.to_string();
            }
        };

        info!("Creating task '{}' due {}", args.title, args.due_date);
        let task = NewTask {
            title: args.title,
            description: args.description,
            due_date: args.due_date,
            completed: false,
        };
        render::render_created(api.create_task(&task).await)
    }
}

pub struct ListHandler;

#[async_trait]
impl CommandHandler for ListHandler {
    async fn handle(&self, api: &dyn TaskApi, _args: &[&str]) -> String {
        info!("Listing tasks");
        render::render_list(api.list_tasks().await)
    }
}

pub struct ViewHandler;

#[async_trait]
impl CommandHandler for ViewHandler {
    async fn handle(&self, api: &dyn TaskApi, args: &[&str]) -> String {
        let task_id = match parse_task_id(args) {
            Ok(task_id) => task_id,
            Err(e) => {
                debug!("Rejected /view: {}", e);
                return messages::VIEW_USAGE.to_string();
            }
        };

        info!("Viewing task {}", task_id);
        render::render_task(api.get_task(task_id).await)
    }
}

pub struct UpdateHandler;

#[async_trait]
impl CommandHandler for UpdateHandler {
    async fn handle(&self, api: &dyn TaskApi, args: &[&str]) -> String {
        let args = match UpdateArgs::parse(args) {
            Ok(args) => args,
            Err(e) => {
                debug!("Rejected /update: {}", e);
                return messages::UPDATE_USAGE.to_string();
            }
        };

        info!("Renaming task {}", args.task_id);
        let update = TaskUpdateInput {
            title: Some(args.title),
            ..Default::default()
        };
        render::render_updated(
            api.update_task(args.task_id, &update).await,
            messages::UPDATE_OK,
            messages::UPDATE_FAILED,
        )
    }
}

pub struct CompleteHandler;

#[async_trait]
impl CommandHandler for CompleteHandler {
    async fn handle(&self, api: &dyn TaskApi, args: &[&str]) -> String {
        let task_id = match parse_task_id(args) {
            Ok(task_id) => task_id,
            Err(e) => {
                debug!("Rejected /complete: {}", e);
                return messages::COMPLETE_USAGE.to_string();
            }
        };

        info!("Completing task {}", task_id);
        let update = TaskUpdateInput {
            completed: Some(true),
            ..Default::default()
        };
        render::render_updated(
            api.update_task(task_id, &update).await,
            messages::COMPLETE_OK,
            messages::COMPLETE_FAILED,
        )
    }
}

pub struct DeleteHandler;

#[async_trait]
impl CommandHandler for DeleteHandler {
    async fn handle(&self, api: &dyn TaskApi, args: &[&str]) -> String {
        let task_id = match parse_task_id(args) {
            Ok(task_id) => task_id,
            Err(e) => {
                debug!("Rejected /delete: {}", e);
                return messages::DELETE_USAGE.to_string();
            }
        };

        info!("Deleting task {}", task_id);
        render::render_deleted(api.delete_task(task_id).await)
    }
}
