mod support;

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use onair_dashboard::api::{ButtonKind, DispatcherApi};
use onair_dashboard::context::DashboardContext;
use onair_dashboard::controller::DashboardController;
use onair_dashboard::led::{LedColor, LedState};
use onair_dashboard::transport::{DispatcherLink, FrameHandler, LinkSender};
use onair_dashboard::{DashboardConfig, ReconnectPolicy};
use serde_json::{Value, json};

use support::mock_api::MockApiServer;
use support::mock_dispatcher::MockDispatcherServer;
use support::wait_until;

fn controller_for(api: &MockApiServer, context: Arc<DashboardContext>) -> DashboardController {
    let config = DashboardConfig::new(api.origin());
    let api = DispatcherApi::new(&config).expect("api client builds");
    DashboardController::new(context, api)
}

fn linked_context(url: String) -> (Arc<DashboardContext>, DispatcherLink) {
    let sender = LinkSender::detached();
    let context = Arc::new(DashboardContext::new(sender.clone()));
    let handler: Arc<dyn FrameHandler> = context.clone();
    let link = DispatcherLink::start(url, ReconnectPolicy::none(), sender, handler);
    (context, link)
}

#[tokio::test]
async fn load_studios_registers_rows_and_warms_every_studio_when_open() {
    let mut ws = match MockDispatcherServer::start().await {
        Ok(server) => server,
        Err(err) => {
            eprintln!("Skipping: unable to start mock dispatcher: {err}");
            return;
        }
    };
    let mut api = MockApiServer::start(vec!["studio1".into(), "studio2".into()])
        .await
        .expect("mock api starts");

    let (context, mut link) = linked_context(ws.ws_url());
    let mut connection = ws.accept_connection().await;
    assert!(wait_until(|| context.sender().is_open()).await);

    let controller = controller_for(&api, Arc::clone(&context));
    let studios = controller.load_studios().await.unwrap();
    assert_eq!(studios, vec!["studio1".to_string(), "studio2".to_string()]);
    assert_eq!(api.recv_path().await, "/api/v1/studios");

    context.with_cache(|cache| {
        assert!(cache.contains("studio1"));
        assert!(cache.contains("studio2"));
    });

    // The warm-up requests a snapshot for every studio, not just the
    // selected one (nothing is selected here).
    let mut warmed = BTreeSet::new();
    for _ in 0..2 {
        let message = connection.recv_outbound().await;
        assert_eq!(
            message.get("type").and_then(Value::as_str),
            Some("studio.led.status")
        );
        warmed.insert(
            message
                .get("studio")
                .and_then(Value::as_str)
                .expect("studio field")
                .to_string(),
        );
    }
    assert_eq!(
        warmed,
        BTreeSet::from(["studio1".to_string(), "studio2".to_string()])
    );

    link.stop().await;
}

#[tokio::test]
async fn load_studios_skips_warm_up_while_link_is_down() {
    let mut api = MockApiServer::start(vec!["studio1".into()])
        .await
        .expect("mock api starts");

    let context = Arc::new(DashboardContext::new(LinkSender::detached()));
    let controller = controller_for(&api, Arc::clone(&context));

    let studios = controller.load_studios().await.unwrap();
    assert_eq!(studios, vec!["studio1".to_string()]);
    assert_eq!(api.recv_path().await, "/api/v1/studios");

    // Rows registered; no socket, so nothing else to observe and no error.
    assert!(context.with_cache(|cache| cache.contains("studio1")));
}

#[tokio::test]
async fn press_fires_only_with_a_selected_studio() {
    let mut api = MockApiServer::start(vec![]).await.expect("mock api starts");

    let context = Arc::new(DashboardContext::new(LinkSender::detached()));
    let controller = controller_for(&api, Arc::clone(&context));

    // No selection: the press is swallowed without any request.
    controller.press(ButtonKind::Takeover);
    assert!(
        api.try_recv_path(Duration::from_millis(300)).await.is_none(),
        "press without selection must not reach the dispatcher"
    );

    controller.select_studio("studio1").await;
    controller.press(ButtonKind::Takeover);
    assert_eq!(api.recv_path().await, "/api/v1/studio1/press/takeover");

    controller.press(ButtonKind::Immediate);
    assert_eq!(api.recv_path().await, "/api/v1/studio1/press/immediate");
}

#[tokio::test]
async fn selecting_a_studio_pulls_its_snapshot_into_the_cache() {
    let mut ws = match MockDispatcherServer::start().await {
        Ok(server) => server,
        Err(err) => {
            eprintln!("Skipping: unable to start mock dispatcher: {err}");
            return;
        }
    };
    let api = MockApiServer::start(vec!["studio1".into()])
        .await
        .expect("mock api starts");

    let (context, mut link) = linked_context(ws.ws_url());
    let mut connection = ws.accept_connection().await;
    assert!(wait_until(|| context.sender().is_open()).await);

    let controller = controller_for(&api, Arc::clone(&context));
    controller.load_studios().await.unwrap();
    connection.recv_subscribe("studio1").await; // warm-up

    controller.select_studio("studio1").await;
    connection.recv_subscribe("studio1").await;

    // The dispatcher answers the pull with a snapshot.
    connection
        .push_frame(
            "studio.led.status",
            json!({
                "studio": "studio1",
                "status": {
                    "green": {"state": "on", "blink_freq": 2},
                    "yellow": {"state": "off", "blink_freq": 2},
                    "red": {"state": "blink", "blink_freq": 2},
                }
            }),
        )
        .await;

    let mirrored = wait_until(|| {
        context.with_cache(|cache| {
            cache
                .row("studio1")
                .is_some_and(|row| row.widget(LedColor::Red).state == LedState::Blink)
        })
    })
    .await;
    assert!(mirrored, "snapshot never reached the cache");

    context.with_cache(|cache| {
        let row = cache.row("studio1").expect("row registered");
        assert_eq!(row.widget(LedColor::Green).state, LedState::On);
        assert_eq!(row.widget(LedColor::Red).period_secs, Some(0.5));
    });

    link.stop().await;
}
