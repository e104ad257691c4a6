//! Navigation and rendering driven through user actions

use std::{sync::Arc, time::Duration};

use remote_services::{
    services::{AlwaysFail, AlwaysSucceed, RequestSimulator},
    state::ClimateControlState,
    ui::{
        AirConditionerSettings, AirConditionerView, Flow, Frame, Layout, Navigator,
        RemoteAction, Route, UserAction,
    },
};
use tokio::{
    sync::mpsc::{self, error::TryRecvError, UnboundedReceiver},
    time::{sleep, timeout, Instant},
};

fn navigator(simulator: Arc<dyn RequestSimulator>) -> (Navigator, UnboundedReceiver<Frame>) {
    let (frames_tx, frames_rx) = mpsc::unbounded_channel();
    let settings = AirConditionerSettings {
        simulator,
        ..AirConditionerSettings::default()
    };
    (Navigator::new(settings, frames_tx), frames_rx)
}

async fn next_frame(frames: &mut UnboundedReceiver<Frame>) -> Frame {
    timeout(Duration::from_secs(3600), frames.recv())
        .await
        .expect("no frame rendered")
        .expect("frame channel closed")
}

async fn air_conditioner_frame(
    frames: &mut UnboundedReceiver<Frame>,
    matches: impl Fn(&AirConditionerView) -> bool,
) -> AirConditionerView {
    loop {
        if let Frame::AirConditioner(view) = next_frame(frames).await {
            if matches(&view) {
                return view;
            }
        }
    }
}

fn open_air_conditioner(navigator: &mut Navigator) {
    navigator.handle(UserAction::Remote(RemoteAction::AirConditioner));
    assert_eq!(navigator.current(), Route::AirConditioner);
}

#[tokio::test(start_paused = true)]
async fn session_starts_on_home_screen() {
    let (navigator, mut frames) = navigator(Arc::new(AlwaysSucceed));

    assert_eq!(navigator.current(), Route::Home);
    assert!(navigator.air_conditioner().is_none());
    match frames.try_recv() {
        Ok(Frame::Home(view)) => assert_eq!(view.remote_actions, RemoteAction::ALL),
        other => panic!("expected home frame, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn air_conditioner_opens_on_confirm_layout() {
    let (mut navigator, mut frames) = navigator(Arc::new(AlwaysSucceed));
    open_air_conditioner(&mut navigator);

    let view = air_conditioner_frame(&mut frames, |_| true).await;
    assert_eq!(view.layout, Layout::Confirm { startup_minutes: 10 });
    assert_eq!(view.banner, None);
}

#[tokio::test(start_paused = true)]
async fn start_and_stop_render_each_layout() {
    let (mut navigator, mut frames) = navigator(Arc::new(AlwaysSucceed));
    open_air_conditioner(&mut navigator);
    air_conditioner_frame(&mut frames, |_| true).await;

    navigator.handle(UserAction::Start);
    air_conditioner_frame(&mut frames, |view| view.layout == Layout::Requesting).await;

    let running = air_conditioner_frame(&mut frames, |view| {
        matches!(view.layout, Layout::Running { .. })
    })
    .await;
    assert_eq!(
        running.layout,
        Layout::Running {
            startup_minutes: 10,
            remaining_minutes: 9
        }
    );

    navigator.handle(UserAction::Stop);
    air_conditioner_frame(&mut frames, |view| {
        view.layout == Layout::Confirm { startup_minutes: 10 }
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn error_banner_is_dismissed_automatically() {
    let (mut navigator, mut frames) = navigator(Arc::new(AlwaysFail));
    open_air_conditioner(&mut navigator);
    navigator.handle(UserAction::Start);

    let failed = air_conditioner_frame(&mut frames, |view| view.banner.is_some()).await;
    assert_eq!(failed.layout, Layout::Confirm { startup_minutes: 10 });
    let shown = Instant::now();

    air_conditioner_frame(&mut frames, |view| view.banner.is_none()).await;
    assert!(shown.elapsed() >= Duration::from_millis(2_900));

    let controller = navigator.air_conditioner().unwrap();
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.error, None);
    assert_eq!(snapshot.state, ClimateControlState::Idle);
}

#[tokio::test(start_paused = true)]
async fn run_time_changes_are_rendered() {
    let (mut navigator, mut frames) = navigator(Arc::new(AlwaysSucceed));
    open_air_conditioner(&mut navigator);

    navigator.handle(UserAction::SetStartupMinutes(25));
    air_conditioner_frame(&mut frames, |view| {
        view.layout == Layout::Confirm { startup_minutes: 25 }
    })
    .await;

    navigator.handle(UserAction::SetStartupMinutes(0));
    navigator.handle(UserAction::SetStartupMinutes(61));
    let snapshot = navigator.air_conditioner().unwrap().snapshot();
    assert_eq!(snapshot.startup_minutes.get(), 25);
    assert_eq!(snapshot.remaining_minutes, 24);
}

#[tokio::test(start_paused = true)]
async fn leaving_the_screen_discards_its_state() {
    let (mut navigator, mut frames) = navigator(Arc::new(AlwaysSucceed));
    open_air_conditioner(&mut navigator);
    navigator.handle(UserAction::SetStartupMinutes(30));
    navigator.handle(UserAction::Start);

    navigator.handle(UserAction::Back);
    assert_eq!(navigator.current(), Route::Home);
    assert!(navigator.air_conditioner().is_none());

    open_air_conditioner(&mut navigator);
    let snapshot = navigator.air_conditioner().unwrap().snapshot();
    assert_eq!(snapshot.state, ClimateControlState::Idle);
    assert_eq!(snapshot.startup_minutes.get(), 10);
    assert_eq!(snapshot.remaining_minutes, 9);

    // Drain until the reopened screen renders its first frame
    air_conditioner_frame(&mut frames, |view| {
        view.layout == Layout::Confirm { startup_minutes: 10 }
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn climate_actions_on_home_are_ignored() {
    let (mut navigator, mut frames) = navigator(Arc::new(AlwaysSucceed));
    assert!(matches!(frames.try_recv(), Ok(Frame::Home(_))));

    assert_eq!(navigator.handle(UserAction::Start), Flow::Continue);
    assert_eq!(navigator.handle(UserAction::Back), Flow::Continue);
    assert_eq!(
        navigator.handle(UserAction::Remote(RemoteAction::Hazard)),
        Flow::Continue
    );
    tokio::task::yield_now().await;

    assert_eq!(navigator.current(), Route::Home);
    assert!(matches!(frames.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test(start_paused = true)]
async fn navigating_home_closes_the_air_conditioner_screen() {
    let (mut navigator, mut frames) = navigator(Arc::new(AlwaysSucceed));
    open_air_conditioner(&mut navigator);
    air_conditioner_frame(&mut frames, |_| true).await;

    navigator.navigate(Route::Home);
    assert_eq!(navigator.current(), Route::Home);
    assert!(navigator.air_conditioner().is_none());
    assert!(matches!(frames.try_recv(), Ok(Frame::Home(_))));

    // Nothing left behind the home screen reacts to climate actions
    navigator.handle(UserAction::Start);
    sleep(Duration::from_secs(4)).await;
    assert!(matches!(frames.try_recv(), Err(TryRecvError::Empty)));

    navigator.handle(UserAction::Back);
    assert_eq!(navigator.current(), Route::Home);
}

#[tokio::test(start_paused = true)]
async fn help_is_left_to_the_host() {
    let (mut navigator, mut frames) = navigator(Arc::new(AlwaysSucceed));
    assert!(matches!(frames.try_recv(), Ok(Frame::Home(_))));

    assert_eq!(navigator.handle(UserAction::Help), Flow::Help);
    assert!(matches!(frames.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test(start_paused = true)]
async fn quit_ends_the_session() {
    let (mut navigator, _frames) = navigator(Arc::new(AlwaysSucceed));
    assert_eq!(navigator.handle(UserAction::Quit), Flow::Quit);
}

#[tokio::test(start_paused = true)]
async fn frames_queued_before_quit_can_still_be_drained() {
    let (mut navigator, mut frames) = navigator(Arc::new(AlwaysSucceed));
    open_air_conditioner(&mut navigator);
    navigator.handle(UserAction::Start);
    sleep(Duration::from_millis(1)).await;

    assert_eq!(navigator.handle(UserAction::Quit), Flow::Quit);
    drop(navigator);

    let mut drained = Vec::new();
    while let Ok(frame) = frames.try_recv() {
        drained.push(frame);
    }
    assert!(matches!(drained.first(), Some(Frame::Home(_))));
    assert!(drained.iter().any(|frame| matches!(
        frame,
        Frame::AirConditioner(view) if view.layout == Layout::Requesting
    )));
}
