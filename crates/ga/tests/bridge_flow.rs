//! Integration test for the full event-to-analytics-call flow: bridge
//! construction, handler dispatch through the plugin surface, and
//! completion-hook delivery.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;

use beacon_core::config::BridgeConfig;
use beacon_core::events::{
    BeaconEvent, ClickPayload, CommandPayload, InstrumentationNode, PageViewPayload,
};
use beacon_core::tracker::TrackerSettings;
use beacon_ga::{capture_client, completing_client, AnalyticsBridge, HitCallback};

fn counting_hook() -> (HitCallback, Arc<AtomicUsize>) {
    let fired = Arc::new(AtomicUsize::new(0));
    let handle = fired.clone();
    let hook: HitCallback = Box::new(move || {
        handle.fetch_add(1, Ordering::SeqCst);
    });
    (hook, fired)
}

fn sample_pageview(tracker: Option<&str>) -> PageViewPayload {
    PageViewPayload {
        tracker: tracker.map(str::to_string),
        location: "http://www.mywebsite.com/foo".into(),
        url: Some("/foo".into()),
        title: Some("Foo".into()),
    }
}

fn sample_node(tracker: Option<&str>) -> InstrumentationNode {
    let node = InstrumentationNode::default()
        .with_attr("category", "foo")
        .with_attr("action", "bar")
        .with_attr("label", "baz")
        .with_attr("value", 1);
    match tracker {
        Some(name) => node.with_attr("tracker", name),
        None => node,
    }
}

#[test]
fn test_construction_issues_create() {
    let client = capture_client();
    let _bridge = AnalyticsBridge::new("UA-000000-1", client.clone());

    assert_eq!(client.count_selector("create"), 1);
    let create = client.last().unwrap();
    assert_eq!(create.field("trackingId"), Some(&json!("UA-000000-1")));
    assert_eq!(create.field("cookieDomain"), Some(&json!("auto")));
    assert!(create.field("name").is_none());
    assert!(create.field("userId").is_none());
}

#[test]
fn test_construction_with_settings_carries_name() {
    let client = capture_client();
    let settings = TrackerSettings::new("UA-000000-1").with_name("myTracker");
    let _bridge = AnalyticsBridge::new(settings, client.clone());

    let create = client.last().unwrap();
    assert_eq!(create.field("name"), Some(&json!("myTracker")));
}

#[test]
fn test_pageview_hook_fires_on_hit_completion() {
    let client = completing_client();
    let plugin = AnalyticsBridge::new("UA-000000-1", client.clone()).into_plugin();
    let (hook, fired) = counting_hook();

    plugin.handle(
        BeaconEvent::PageView(PageViewPayload {
            tracker: None,
            location: "/foo".into(),
            url: None,
            title: None,
        }),
        Some(hook),
    );

    let call = client.last().unwrap();
    assert_eq!(call.selector, "send");
    assert_eq!(call.args, vec![json!("pageview")]);
    assert_eq!(call.field("location"), Some(&json!("/foo")));
    assert!(call.field("page").is_none());
    assert!(call.field("title").is_none());
    assert!(call.had_hit_callback);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_pageview_hook_waits_for_completion() {
    let client = capture_client();
    let plugin = AnalyticsBridge::new("UA-000000-1", client.clone()).into_plugin();
    let (hook, fired) = counting_hook();

    plugin.handle(BeaconEvent::PageView(sample_pageview(None)), Some(hook));

    // The hook rides the call; it has not fired until the hit completes
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert_eq!(client.fire_pending_hooks(), 1);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_pageview_named_tracker_selector_and_fields() {
    let client = completing_client();
    let plugin = AnalyticsBridge::new("UA-000000-1", client.clone()).into_plugin();
    let (hook, fired) = counting_hook();

    plugin.handle(BeaconEvent::PageView(sample_pageview(Some("myTracker"))), Some(hook));

    let call = client.last().unwrap();
    assert_eq!(call.selector, "myTracker.send");
    assert_eq!(
        call.field("location"),
        Some(&json!("http://www.mywebsite.com/foo"))
    );
    assert_eq!(call.field("page"), Some(&json!("/foo")));
    assert_eq!(call.field("title"), Some(&json!("Foo")));
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_click_event_positional_order() {
    let client = completing_client();
    let plugin = AnalyticsBridge::new("UA-000000-1", client.clone()).into_plugin();
    let (hook, fired) = counting_hook();

    plugin.handle(
        BeaconEvent::Click(ClickPayload {
            node: sample_node(Some("myTracker")),
        }),
        Some(hook),
    );

    let call = client.last().unwrap();
    assert_eq!(call.selector, "myTracker.send");
    assert_eq!(
        call.args,
        vec![json!("event"), json!("foo"), json!("bar"), json!("baz"), json!(1)]
    );
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_command_selector_follows_tracker() {
    let client = capture_client();
    let plugin = AnalyticsBridge::new("UA-000000-1", client.clone()).into_plugin();

    let arguments = vec![json!("event"), json!("Outbound Link"), json!("click")];

    plugin.handle(
        BeaconEvent::Command(CommandPayload {
            tracker: None,
            command_name: "send".into(),
            arguments: arguments.clone(),
        }),
        None,
    );
    plugin.handle(
        BeaconEvent::Command(CommandPayload {
            tracker: Some("myTracker".into()),
            command_name: "send".into(),
            arguments: arguments.clone(),
        }),
        None,
    );

    let calls = client.calls();
    assert_eq!(calls[1].selector, "send");
    assert_eq!(calls[1].args, arguments);
    assert_eq!(calls[2].selector, "myTracker.send");
    assert_eq!(calls[2].args, arguments);
}

#[test]
fn test_command_hook_invoked_directly_exactly_once() {
    // The command path has no native completion hook; the bridge fires
    // the hook itself even when the client never completes anything.
    let client = capture_client();
    let plugin = AnalyticsBridge::new("UA-000000-1", client.clone()).into_plugin();
    let (hook, fired) = counting_hook();

    plugin.handle(
        BeaconEvent::Command(CommandPayload {
            tracker: None,
            command_name: "send".into(),
            arguments: vec![json!("event"), json!("Outbound Link"), json!("click")],
        }),
        Some(hook),
    );

    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(client.pending_hook_count(), 0);
    assert_eq!(client.fire_pending_hooks(), 0);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_from_config_bridge_flow() {
    let client = completing_client();
    let mut config = BridgeConfig::default();
    config.tracker.tracking_id = "UA-000000-1".into();
    config.tracker.name = Some("myTracker".into());

    let plugin = AnalyticsBridge::from_config(&config, client.clone()).into_plugin();
    assert!(plugin.bridge().validate().is_ok());

    let create = client.last().unwrap();
    assert_eq!(create.field("trackingId"), Some(&json!("UA-000000-1")));
    assert_eq!(create.field("name"), Some(&json!("myTracker")));
}
