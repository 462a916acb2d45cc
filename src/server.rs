//! MCP server exposing the documentation tools.

use crate::tools::{
    FindRelatedRequest, GetDetailsRequest, GetTopicRequest, ListCategoryRequest,
    ListTopicsRequest, MemberSearchRequest, ParameterSearchRequest, SearchRequest,
    handle_find_related, handle_get_details, handle_get_topic, handle_list_category,
    handle_list_topics, handle_member_search, handle_parameter_search, handle_search,
};
use crate::worker::DocState;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server for Cute Framework documentation queries
#[derive(Clone)]
pub struct DocServer {
    /// Shared documentation state (the index, once built)
    state: Arc<DocState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DocServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl DocServer {
    /// Create a server over shared state. The index may still be building.
    pub fn new(state: Arc<DocState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the shared DocState.
    pub fn doc_state(&self) -> &Arc<DocState> {
        &self.state
    }

    #[tool(
        name = "cf_search",
        description = "Search Cute Framework documentation for functions, structs, enums and topic guides. Matches names, briefs, remarks and categories; exact and prefix name matches rank first.",
        input_schema = inline_schema_for_type::<SearchRequest>()
    )]
    async fn search(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.state, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(
        name = "cf_get_details",
        description = "Get complete documentation for a Cute Framework item by exact name: signature, parameters, members or enum entries, remarks, example, related items and the topic guides that mention it.",
        input_schema = inline_schema_for_type::<GetDetailsRequest>()
    )]
    async fn get_details(
        &self,
        Parameters(request): Parameters<GetDetailsRequest>,
    ) -> std::result::Result<String, String> {
        handle_get_details(&self.state, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(
        name = "cf_list_category",
        description = "List documentation categories with item counts, or every item in one category (optionally filtered by type).",
        input_schema = inline_schema_for_type::<ListCategoryRequest>()
    )]
    async fn list_category(
        &self,
        Parameters(request): Parameters<ListCategoryRequest>,
    ) -> std::result::Result<String, String> {
        handle_list_category(&self.state, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(
        name = "cf_find_related",
        description = "Find items related to a Cute Framework item in both directions: the items it lists as related and the items that list it.",
        input_schema = inline_schema_for_type::<FindRelatedRequest>()
    )]
    async fn find_related(
        &self,
        Parameters(request): Parameters<FindRelatedRequest>,
    ) -> std::result::Result<String, String> {
        handle_find_related(&self.state, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(
        name = "cf_parameter_search",
        description = "Find functions that take a type as a parameter or return it. Useful for discovering how to create or consume a type.",
        input_schema = inline_schema_for_type::<ParameterSearchRequest>()
    )]
    async fn parameter_search(
        &self,
        Parameters(request): Parameters<ParameterSearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_parameter_search(&self.state, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(
        name = "cf_member_search",
        description = "Find structs whose member declarations match a name or type.",
        input_schema = inline_schema_for_type::<MemberSearchRequest>()
    )]
    async fn member_search(
        &self,
        Parameters(request): Parameters<MemberSearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_member_search(&self.state, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(
        name = "cf_list_topics",
        description = "List Cute Framework topic guides, optionally filtered by category or in recommended reading order.",
        input_schema = inline_schema_for_type::<ListTopicsRequest>()
    )]
    async fn list_topics(
        &self,
        Parameters(request): Parameters<ListTopicsRequest>,
    ) -> std::result::Result<String, String> {
        handle_list_topics(&self.state, request)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(
        name = "cf_get_topic",
        description = "Read the full content of a Cute Framework topic guide, including its sections and the API items it references.",
        input_schema = inline_schema_for_type::<GetTopicRequest>()
    )]
    async fn get_topic(
        &self,
        Parameters(request): Parameters<GetTopicRequest>,
    ) -> std::result::Result<String, String> {
        handle_get_topic(&self.state, request)
            .await
            .map_err(|e| e.to_string())
    }
}

#[tool_handler]
impl ServerHandler for DocServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "cf-docs-mcp: Cute Framework API and topic documentation. \
                 Start with cf_search or cf_list_topics, then use cf_get_details or cf_get_topic \
                 for full documentation. Functions use the cf_ prefix, types use CF_. \
                 The index is built at startup; tools report 'Index not available' until it is ready."
                    .to_string(),
            )
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// to generate inline enum definitions instead of $ref patterns. This ensures MCP Inspector
/// displays enums as dropdown widgets rather than raw JSON input fields.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let serde_json::Value::Object(json_object) = object else {
        panic!("Schema serialization produced non-object value");
    };

    Arc::new(json_object)
}
