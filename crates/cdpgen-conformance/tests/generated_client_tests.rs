//! Behavior of the client generated from `protocol/conformance.json`

#![allow(non_snake_case)]

use cdpgen_conformance::cdp::Client;
use cdpgen_conformance::cdp::commands::page::{NavigateArgs, ReloadArgs};
use cdpgen_conformance::cdp::commands::{CmdType, network};
use cdpgen_conformance::cdp::events::EventType;
use cdpgen_conformance::cdp::events::network::ResponseReceivedReply;
use cdpgen_conformance::cdp::types::console::Message;
use cdpgen_conformance::cdp::types::dom::Node;
use cdpgen_conformance::cdp::types::layer_tree::Snapshot;
use cdpgen_conformance::cdp::types::network::ResourceType;
use cdpgen_conformance::cdp::types::page::{Frame, FrameState, FrameTree, TransitionType};
use cdpgen_runtime::{Connection, MessageStream, RpcError, RpcResult, WireEnum, async_trait};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Arc;

// Records every invocation and answers with a canned reply
#[derive(Default)]
struct RecordingConnection {
    calls: Mutex<Vec<(String, Option<Value>)>>,
    reply: Vec<u8>,
    events: Mutex<VecDeque<Vec<u8>>>,
    subscriptions: Mutex<Vec<String>>,
}

impl RecordingConnection {
    fn replying(reply: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: serde_json::to_vec(&reply).unwrap(),
            ..Default::default()
        })
    }

    fn with_events(events: &[Value]) -> Arc<Self> {
        Arc::new(Self {
            reply: b"{}".to_vec(),
            events: Mutex::new(
                events
                    .iter()
                    .map(|e| serde_json::to_vec(e).unwrap())
                    .collect(),
            ),
            ..Default::default()
        })
    }

    fn calls(&self) -> Vec<(String, Option<Value>)> {
        self.calls.lock().clone()
    }
}

struct QueueStream(VecDeque<Vec<u8>>);

#[async_trait]
impl MessageStream for QueueStream {
    async fn recv_msg(&mut self) -> RpcResult<Vec<u8>> {
        self.0.pop_front().ok_or(RpcError::StreamClosed)
    }

    async fn close(&mut self) -> RpcResult<()> {
        self.0.clear();
        Ok(())
    }
}

#[async_trait]
impl Connection for RecordingConnection {
    async fn invoke(&self, method: &str, params: Option<Vec<u8>>) -> RpcResult<Vec<u8>> {
        let params = params.map(|p| serde_json::from_slice(&p).unwrap());
        self.calls.lock().push((method.to_string(), params));
        Ok(self.reply.clone())
    }

    async fn subscribe(&self, method: &str) -> RpcResult<Box<dyn MessageStream>> {
        self.subscriptions.lock().push(method.to_string());
        let queued = std::mem::take(&mut *self.events.lock());
        Ok(Box::new(QueueStream(queued)))
    }
}

// Client tests

#[tokio::test]
async fn Client___command_without_payloads___sends_no_params() {
    let conn = RecordingConnection::replying(json!({}));
    let client = Client::new(conn.clone());

    client.page.enable().await.unwrap();
    client.console.clear_messages().await.unwrap();

    assert_eq!(
        conn.calls(),
        vec![
            ("Page.enable".to_string(), None),
            ("Console.clearMessages".to_string(), None),
        ]
    );
}

#[tokio::test]
async fn Client___optional_arguments_unset___empty_object() {
    let conn = RecordingConnection::replying(json!({}));
    let client = Client::new(conn.clone());

    client.page.reload(&ReloadArgs::new()).await.unwrap();
    client
        .page
        .reload(&ReloadArgs::new().with_ignore_cache(true))
        .await
        .unwrap();

    let calls = conn.calls();
    assert_eq!(calls[0], ("Page.reload".to_string(), Some(json!({}))));
    assert_eq!(
        calls[1],
        ("Page.reload".to_string(), Some(json!({ "ignoreCache": true })))
    );
}

#[tokio::test]
async fn Client___navigate___encodes_args_and_decodes_reply() {
    let conn = RecordingConnection::replying(json!({ "frameId": "F1", "loaderId": "L1" }));
    let client = Client::new(conn.clone());
    let args = NavigateArgs::new("https://example.com/".to_string())
        .with_transition_type(TransitionType::AutoBookmark);

    let reply = client.page.navigate(&args).await.unwrap();

    assert_eq!(reply.frame_id, "F1");
    assert_eq!(reply.loader_id.as_deref(), Some("L1"));
    assert_eq!(reply.error_text, None);
    assert_eq!(
        conn.calls()[0],
        (
            "Page.navigate".to_string(),
            Some(json!({ "url": "https://example.com/", "transitionType": "auto_bookmark" }))
        )
    );
}

#[tokio::test]
async fn Client___frame_tree_reply___required_frame_by_value() {
    let conn = RecordingConnection::replying(json!({
        "frameTree": {
            "frame": {
                "id": "main",
                "loaderId": "L1",
                "tree": { "frame": { "id": "inner", "loaderId": "L2", "state": "attached" } }
            },
            "childFrames": [{ "frame": { "id": "child", "loaderId": "L3" } }]
        }
    }));
    let client = Client::new(conn);

    let reply = client.page.get_frame_tree().await.unwrap();

    let main: &Frame = &reply.frame_tree.frame;
    assert_eq!(main.id, "main");
    let inner: &FrameTree = main.tree.as_deref().unwrap();
    assert_eq!(inner.frame.id, "inner");
    assert_eq!(inner.frame.state, FrameState::Attached);
    assert_eq!(reply.frame_tree.child_frames[0].frame.id, "child");
}

#[tokio::test]
async fn Client___malformed_reply___decode_error() {
    let conn = RecordingConnection::replying(json!({ "body": 7 }));
    let client = Client::new(conn);

    let result = client
        .network
        .get_response_body(&network::GetResponseBodyArgs::new("R1".to_string()))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn Client___event___subscribes_by_wire_name_and_decodes() {
    let conn = RecordingConnection::with_events(&[
        json!({ "timestamp": 12.5 }),
        json!({ "timestamp": 13.0 }),
    ]);
    let client = Client::new(conn.clone());

    let mut events = client.page.load_event_fired().await.unwrap();

    assert_eq!(events.method(), "Page.loadEventFired");
    assert_eq!(events.recv().await.unwrap().timestamp, 12.5);
    assert_eq!(events.recv().await.unwrap().timestamp, 13.0);
    assert!(matches!(events.recv().await, Err(RpcError::StreamClosed)));
    assert_eq!(*conn.subscriptions.lock(), vec!["Page.loadEventFired".to_string()]);
}

#[tokio::test]
async fn Client___console_event___carries_record() {
    let conn = RecordingConnection::with_events(&[json!({
        "message": { "source": "javascript", "level": "log", "text": "hello", "line": 3 }
    })]);
    let client = Client::new(conn);

    let mut events = client.console.message_added().await.unwrap();
    let event = events.recv().await.unwrap();

    assert_eq!(event.message.text, "hello");
    assert_eq!(event.message.line, Some(3));
    assert_eq!(event.message.url, None);
}

// Registry tests

#[test]
fn Registries___wire_names() {
    assert_eq!(CmdType::PageGetFrameTree.as_str(), "Page.getFrameTree");
    assert_eq!(CmdType::NetworkGetResponseBody.as_str(), "Network.getResponseBody");
    assert_eq!(EventType::NetworkResponseReceived.as_str(), "Network.responseReceived");
}

// Record tests

#[test]
fn Message___optional_fields_absent___omitted() {
    let message = Message {
        source: "javascript".to_string(),
        level: "log".to_string(),
        text: "hello".to_string(),
        ..Message::default()
    };

    assert_eq!(
        serde_json::to_value(&message).unwrap(),
        json!({ "source": "javascript", "level": "log", "text": "hello" })
    );
}

#[test]
fn Message___missing_required_field___fails() {
    let result = serde_json::from_value::<Message>(json!({ "source": "network", "level": "error" }));

    assert!(result.is_err());
}

#[test]
fn Frame___nested_parent___round_trips() {
    let frame = Frame {
        id: "child".to_string(),
        loader_id: "L1".to_string(),
        parent_frame: Some(Box::new(Frame {
            id: "main".to_string(),
            loader_id: "L0".to_string(),
            state: FrameState::Detached,
            ..Frame::default()
        })),
        child_ids: vec!["grandchild".to_string()],
        ..Frame::default()
    };

    let value = serde_json::to_value(&frame).unwrap();

    assert_eq!(
        value,
        json!({
            "id": "child",
            "parentFrame": { "id": "main", "loaderId": "L0", "state": "detached" },
            "loaderId": "L1",
            "childIds": ["grandchild"]
        })
    );
    assert_eq!(serde_json::from_value::<Frame>(value).unwrap(), frame);
}

#[test]
fn Frame___explicit_null_enum___decodes_not_set() {
    let frame: Frame =
        serde_json::from_value(json!({ "id": "main", "loaderId": "L1", "state": null })).unwrap();

    assert!(frame.state.is_not_set());
    assert_eq!(
        serde_json::to_value(&frame).unwrap(),
        json!({ "id": "main", "loaderId": "L1" })
    );
}

#[test]
fn Frame___unknown_enum_label___fails() {
    let err = serde_json::from_value::<Frame>(json!({ "id": "main", "loaderId": "L1", "state": "floating" }))
        .unwrap_err();

    assert!(err.to_string().contains("floating"));
}

#[test]
fn ResponseReceived___opaque_headers___copied_verbatim() {
    let text = r#"{"frameId":"F1","type":"XHR","headers":{"Accept":"*/*","X-Id":[1,2]}}"#;

    let event: ResponseReceivedReply = serde_json::from_str(text).unwrap();

    assert_eq!(event.type_, ResourceType::XHR);
    assert_eq!(event.headers.0, br#"{"Accept":"*/*","X-Id":[1,2]}"#.to_vec());
    assert_eq!(serde_json::to_string(&event).unwrap(), text);
}

#[test]
fn Node___colliding_wire_names___both_kept() {
    let node: Node = serde_json::from_value(json!({
        "nodeId": 4,
        "node_id": 5,
        "type": "element",
        "children": [{ "nodeId": 6, "type": "text" }]
    }))
    .unwrap();

    assert_eq!(node.node_id, 4);
    assert_eq!(node.node_id_2, Some(5));
    assert_eq!(node.type_, "element");
    assert_eq!(node.children[0].node_id_2, None);
    assert_eq!(
        serde_json::to_value(&node.children[0]).unwrap(),
        json!({ "nodeId": 6, "type": "text" })
    );
}

#[test]
fn Snapshot___required_cycle___boxed_without_option() {
    let partial = serde_json::from_value::<Snapshot>(json!({ "layer": { "snapshot": {} } }));

    assert!(partial.is_err());
}
