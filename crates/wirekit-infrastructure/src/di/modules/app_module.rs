//! App module: server and router settings under `framework.app`

use serde_json::{Value, json};
use tracing::debug;
use wirekit_domain::error::Result;

use super::traits::ConfigModule;
use crate::constants::{APP_MODULE_NAME, APP_MODULE_ROOT, APP_ROUTER_PREFIX, APP_SERVER_PREFIX};
use crate::di::container::ContainerBuilder;
use crate::di::parameters::register_parameters;

/// Exposes `app.server` as `app_server_*` and `app.router` as `app_router_*` parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct AppModule;

impl ConfigModule for AppModule {
    fn name(&self) -> &str {
        APP_MODULE_NAME
    }

    fn root_namespace(&self) -> &str {
        APP_MODULE_ROOT
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "app": {
                    "type": "object",
                    "properties": {
                        "server": {
                            "type": "object",
                            "properties": {
                                "type": {"type": "string", "pattern": "aws|local"},
                                "host": {"type": "string"},
                                "port": {"type": "integer"},
                                "cluster": {"type": "boolean"},
                                "use_cli_arguments": {"type": "boolean"}
                            }
                        },
                        "router": {
                            "type": "object",
                            "properties": {
                                "type": {"type": "string", "pattern": "aws-express|express"}
                            }
                        }
                    }
                }
            }
        })
    }

    fn process_config(&self, builder: &mut ContainerBuilder, subtree: &Value) -> Result<()> {
        let Some(app) = subtree.get("app") else {
            return Ok(());
        };
        if let Some(server) = app.get("server") {
            let count = register_parameters(builder, server, APP_SERVER_PREFIX);
            debug!(count, "Server parameters registered");
        }
        if let Some(router) = app.get("router") {
            let count = register_parameters(builder, router, APP_ROUTER_PREFIX);
            debug!(count, "Router parameters registered");
        }
        Ok(())
    }
}
