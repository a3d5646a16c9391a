//! Agent control loop behavior
//!
//! Drives the executor with scripted gateways and stub tools to pin down
//! termination, exhaustion, normalization, and isolation behavior.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use souschef::agent::{AgentExecutor, History, Scratchpad};
use souschef::core::{Result, SousChefError, ToolCall, ToolDefinition, ToolOutput};
use souschef::llm::ToolSelector;
use souschef::tools::{FinalAnswerTool, Tool, ToolRegistry};

/// What a gateway saw at the moment it was asked for a tool
struct Observation {
    scratchpad_len: usize,
    last_payload: Option<Value>,
}

/// Gateway that proposes a fixed sequence of tool calls
#[derive(Clone, Default)]
struct ScriptedGateway {
    script: Arc<Mutex<VecDeque<(String, Value)>>>,
    observations: Arc<Mutex<Vec<Observation>>>,
}

impl ScriptedGateway {
    fn new(script: Vec<(&str, Value)>) -> Self {
        Self {
            script: Arc::new(Mutex::new(
                script
                    .into_iter()
                    .map(|(name, args)| (name.to_string(), args))
                    .collect(),
            )),
            observations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn calls(&self) -> usize {
        self.observations.lock().unwrap().len()
    }
}

#[async_trait]
impl ToolSelector for ScriptedGateway {
    async fn select_tool(
        &self,
        _input: &str,
        _history: &History,
        scratchpad: &Scratchpad,
        _tools: &[ToolDefinition],
    ) -> Result<ToolCall> {
        let mut observations = self.observations.lock().unwrap();
        observations.push(Observation {
            scratchpad_len: scratchpad.len(),
            last_payload: scratchpad.last_payload().cloned(),
        });
        let call_id = format!("call-{}", observations.len());
        drop(observations);

        let (name, args) = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("gateway script exhausted");
        Ok(ToolCall::new(call_id, name, args))
    }
}

/// Gateway that proposes the same call forever
#[derive(Clone)]
struct RepeatGateway {
    name: String,
    arguments: Value,
    calls: Arc<Mutex<usize>>,
}

impl RepeatGateway {
    fn new(name: &str, arguments: Value) -> Self {
        Self {
            name: name.to_string(),
            arguments,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ToolSelector for RepeatGateway {
    async fn select_tool(
        &self,
        _input: &str,
        _history: &History,
        _scratchpad: &Scratchpad,
        _tools: &[ToolDefinition],
    ) -> Result<ToolCall> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        Ok(ToolCall::new(
            format!("call-{}", *calls),
            self.name.clone(),
            self.arguments.clone(),
        ))
    }
}

/// Tool that returns a fixed output
struct CannedTool {
    name: &'static str,
    output: ToolOutput,
}

#[async_trait]
impl Tool for CannedTool {
    fn name(&self) -> &str {
        self.name
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name, "canned test tool", json!({"type": "object"}))
    }

    async fn execute(&self, _arguments: &Value) -> Result<ToolOutput> {
        Ok(self.output.clone())
    }
}

/// Tool that always fails
struct FailingTool;

#[async_trait]
impl Tool for FailingTool {
    fn name(&self) -> &str {
        "suggest_recipe"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("suggest_recipe", "always fails", json!({"type": "object"}))
    }

    async fn execute(&self, _arguments: &Value) -> Result<ToolOutput> {
        Err(SousChefError::tool("upstream recipe service unavailable"))
    }
}

fn registry_with(tools: Vec<Arc<dyn Tool>>) -> Arc<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    for tool in tools {
        registry.register(tool);
    }
    Arc::new(registry)
}

fn final_answer_args() -> Value {
    json!({"answer": "Try an omelette", "tools_used": []})
}

#[tokio::test]
async fn exhausts_after_max_iterations() {
    let gateway = RepeatGateway::new("suggest_recipe", json!({"user_input": "breakfast"}));
    let tools = registry_with(vec![
        Arc::new(CannedTool {
            name: "suggest_recipe",
            output: ToolOutput::Text("Pasta".to_string()),
        }),
        Arc::new(FinalAnswerTool::new()),
    ]);
    let mut agent = AgentExecutor::new(Box::new(gateway.clone()), tools, 4);

    let err = agent.invoke("high protein breakfast").await.unwrap_err();
    match err {
        SousChefError::AgentExhausted {
            iterations,
            last_payload,
        } => {
            assert_eq!(iterations, 4);
            assert_eq!(last_payload, Some(json!({"answer": "Pasta"})));
        }
        other => panic!("expected AgentExhausted, got {other:?}"),
    }

    assert_eq!(gateway.calls(), 4);
    assert!(agent.history().is_empty());
}

#[tokio::test]
async fn first_call_terminal_returns_payload_and_records_turn() {
    let gateway = ScriptedGateway::new(vec![("final_answer", final_answer_args())]);
    let tools = registry_with(vec![Arc::new(FinalAnswerTool::new())]);
    let mut agent = AgentExecutor::new(Box::new(gateway.clone()), tools, 4);

    let payload = agent.invoke("what should I eat?").await.unwrap();

    assert_eq!(payload, json!({"answer": "Try an omelette", "tools_used": []}));
    assert_eq!(gateway.calls(), 1);
    assert_eq!(agent.history().len(), 1);
    let turn = agent.history().last().unwrap();
    assert_eq!(turn.input, "what should I eat?");
    assert_eq!(turn.answer, "Try an omelette");
}

#[tokio::test]
async fn scratchpad_does_not_leak_between_invocations() {
    let gateway = ScriptedGateway::new(vec![
        ("suggest_recipe", json!({"user_input": "dinner"})),
        ("final_answer", final_answer_args()),
        ("final_answer", final_answer_args()),
    ]);
    let tools = registry_with(vec![
        Arc::new(CannedTool {
            name: "suggest_recipe",
            output: ToolOutput::Text("Risotto".to_string()),
        }),
        Arc::new(FinalAnswerTool::new()),
    ]);
    let mut agent = AgentExecutor::new(Box::new(gateway.clone()), tools, 4);

    agent.invoke("first message").await.unwrap();
    agent.invoke("second message").await.unwrap();

    let observations = gateway.observations.lock().unwrap();
    let lens: Vec<usize> = observations.iter().map(|o| o.scratchpad_len).collect();
    // two selections in the first invoke, a fresh scratchpad in the second
    assert_eq!(lens, vec![0, 2, 0]);
    drop(observations);

    assert_eq!(agent.history().len(), 2);
}

#[tokio::test]
async fn json_object_output_reaches_scratchpad_parsed() {
    let gateway = ScriptedGateway::new(vec![
        ("search_nutritional_info", json!({"recipe_name": "omelette"})),
        ("final_answer", final_answer_args()),
    ]);
    let tools = registry_with(vec![
        Arc::new(CannedTool {
            name: "search_nutritional_info",
            output: ToolOutput::Text(r#"{"calories": 320, "protein_g": 20}"#.to_string()),
        }),
        Arc::new(FinalAnswerTool::new()),
    ]);
    let mut agent = AgentExecutor::new(Box::new(gateway.clone()), tools, 4);

    agent.invoke("nutrition please").await.unwrap();

    let observations = gateway.observations.lock().unwrap();
    assert_eq!(
        observations[1].last_payload,
        Some(json!({"calories": 320, "protein_g": 20}))
    );
}

#[tokio::test]
async fn plain_text_output_is_wrapped_as_answer() {
    let gateway = ScriptedGateway::new(vec![
        ("suggest_recipe", json!({"user_input": "pasta"})),
        ("final_answer", final_answer_args()),
    ]);
    let tools = registry_with(vec![
        Arc::new(CannedTool {
            name: "suggest_recipe",
            output: ToolOutput::Text("Pasta carbonara".to_string()),
        }),
        Arc::new(FinalAnswerTool::new()),
    ]);
    let mut agent = AgentExecutor::new(Box::new(gateway.clone()), tools, 4);

    agent.invoke("suggest something").await.unwrap();

    let observations = gateway.observations.lock().unwrap();
    assert_eq!(
        observations[1].last_payload,
        Some(json!({"answer": "Pasta carbonara"}))
    );
}

#[tokio::test]
async fn unknown_tool_fails_and_leaves_history_intact() {
    let gateway = ScriptedGateway::new(vec![
        ("final_answer", final_answer_args()),
        ("bogus_tool", json!({})),
    ]);
    let tools = registry_with(vec![Arc::new(FinalAnswerTool::new())]);
    let mut agent = AgentExecutor::new(Box::new(gateway.clone()), tools, 4);

    agent.invoke("first").await.unwrap();
    assert_eq!(agent.history().len(), 1);

    let err = agent.invoke("second").await.unwrap_err();
    assert!(matches!(err, SousChefError::UnknownTool(name) if name == "bogus_tool"));
    assert_eq!(agent.history().len(), 1);
}

#[tokio::test]
async fn tool_failure_propagates() {
    let gateway = ScriptedGateway::new(vec![("suggest_recipe", json!({"user_input": "x"}))]);
    let tools = registry_with(vec![Arc::new(FailingTool), Arc::new(FinalAnswerTool::new())]);
    let mut agent = AgentExecutor::new(Box::new(gateway), tools, 4);

    let err = agent.invoke("anything").await.unwrap_err();
    match err {
        SousChefError::ToolExecution(msg) => {
            assert!(msg.contains("suggest_recipe"));
        }
        other => panic!("expected ToolExecution, got {other:?}"),
    }
    assert!(agent.history().is_empty());
}

#[tokio::test]
async fn gateway_contract_violation_propagates() {
    struct ContractGateway;

    #[async_trait]
    impl ToolSelector for ContractGateway {
        async fn select_tool(
            &self,
            _input: &str,
            _history: &History,
            _scratchpad: &Scratchpad,
            _tools: &[ToolDefinition],
        ) -> Result<ToolCall> {
            Err(SousChefError::contract("model returned no tool call"))
        }
    }

    let tools = registry_with(vec![Arc::new(FinalAnswerTool::new())]);
    let mut agent = AgentExecutor::new(Box::new(ContractGateway), tools, 4);

    let err = agent.invoke("anything").await.unwrap_err();
    assert!(matches!(err, SousChefError::UpstreamContract(_)));
    assert!(agent.history().is_empty());
}

#[tokio::test]
async fn terminal_payload_without_answer_is_stringified_into_history() {
    // A terminal tool that forgot the answer field must not fail the loop
    let gateway = ScriptedGateway::new(vec![("final_answer", json!({}))]);
    let tools = registry_with(vec![Arc::new(CannedTool {
        name: "final_answer",
        output: ToolOutput::Structured(json!({"note": "no answer here"})),
    })]);
    let mut agent = AgentExecutor::new(Box::new(gateway), tools, 4);

    let payload = agent.invoke("hello").await.unwrap();
    assert_eq!(payload, json!({"note": "no answer here"}));
    assert_eq!(agent.history().last().unwrap().answer, payload.to_string());
}
