//! Per-screen controller runtime: a closed intent set is processed one at a
//! time against a state snapshot, producing state updates plus one-shot
//! effects delivered through a single-consumer queue.

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

const INTENT_BUFFER: usize = 32;
const EFFECT_BUFFER: usize = 16;

#[async_trait]
pub trait Screen: Send + 'static {
    type State: Clone + Send + Sync + 'static;
    type Intent: Send + 'static;
    type Effect: Send + 'static;

    async fn handle(&mut self, intent: Self::Intent, ctx: &ScreenCtx<Self>);
}

/// Handed to a screen's intent handler: read/update the state cell and emit
/// effects. Errors never leave a handler; they end up in state and/or an
/// error effect here.
pub struct ScreenCtx<Sc: Screen + ?Sized> {
    state: watch::Sender<Sc::State>,
    effects: mpsc::Sender<Sc::Effect>,
}

impl<Sc: Screen + ?Sized> ScreenCtx<Sc> {
    pub fn state(&self) -> Sc::State {
        self.state.borrow().clone()
    }

    pub fn update(&self, f: impl FnOnce(&mut Sc::State)) {
        self.state.send_modify(f);
    }

    /// Queues a one-shot effect. If the host has stopped consuming effects
    /// the send is dropped silently; effects are fire-and-forget.
    pub async fn effect(&self, effect: Sc::Effect) {
        let _ = self.effects.send(effect).await;
    }
}

/// The host's side of a running screen. Dropping the handle closes the
/// intent queue; the actor finishes the intent it is on (in-flight writes
/// are not interrupted) and exits.
pub struct ScreenHandle<Sc: Screen> {
    intents: mpsc::Sender<Sc::Intent>,
    state: watch::Receiver<Sc::State>,
    effects: mpsc::Receiver<Sc::Effect>,
    _task: JoinHandle<()>,
}

pub fn spawn<Sc: Screen>(mut screen: Sc, initial: Sc::State) -> ScreenHandle<Sc> {
    let (intent_tx, mut intent_rx) = mpsc::channel::<Sc::Intent>(INTENT_BUFFER);
    let (state_tx, state_rx) = watch::channel(initial);
    let (effect_tx, effect_rx) = mpsc::channel::<Sc::Effect>(EFFECT_BUFFER);
    let ctx = ScreenCtx {
        state: state_tx,
        effects: effect_tx,
    };
    let task = tokio::spawn(async move {
        // One intent at a time, in arrival order.
        while let Some(intent) = intent_rx.recv().await {
            screen.handle(intent, &ctx).await;
        }
    });
    ScreenHandle {
        intents: intent_tx,
        state: state_rx,
        effects: effect_rx,
        _task: task,
    }
}

impl<Sc: Screen> ScreenHandle<Sc> {
    pub async fn send(&self, intent: Sc::Intent) {
        let _ = self.intents.send(intent).await;
    }

    pub fn state(&self) -> Sc::State {
        self.state.borrow().clone()
    }

    /// Blocks until the state satisfies the predicate, checking the current
    /// value first.
    pub async fn wait_for(&mut self, f: impl FnMut(&Sc::State) -> bool) -> Sc::State {
        let waited = self.state.wait_for(f).await.map(|state| state.clone());
        waited.unwrap_or_else(|_| self.state.borrow().clone())
    }

    /// Receives the next one-shot effect. Each effect is delivered at most
    /// once; the queue buffers across handler turns.
    pub async fn next_effect(&mut self) -> Option<Sc::Effect> {
        self.effects.recv().await
    }

    pub fn try_effect(&mut self) -> Option<Sc::Effect> {
        self.effects.try_recv().ok()
    }
}
