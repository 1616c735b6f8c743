use std::rc::Rc;

use wheel_shared::history::DrawRecord;
use wheel_shared::{PrizePool, WheelConfig};
use yew::prelude::*;

use crate::config::{load_prize_pool, load_wheel_config, save_prize_pool};

/// Session draw history, oldest first.
#[derive(Debug, Default, PartialEq)]
pub struct DrawHistory {
    pub records: Vec<DrawRecord>,
}

impl Reducible for DrawHistory {
    type Action = DrawRecord;

    fn reduce(self: Rc<Self>, record: DrawRecord) -> Rc<Self> {
        let mut records = self.records.clone();
        records.push(record);
        Rc::new(Self { records })
    }
}

/// App-wide wheel state, shared by the wheel and admin pages.
#[derive(Clone, PartialEq)]
pub struct WheelStore {
    pub pool: PrizePool,
    pub config: WheelConfig,
    pub history: UseReducerHandle<DrawHistory>,
    pub commit_pool: Callback<PrizePool>,
}

impl WheelStore {
    pub fn record_draw(&self, record: DrawRecord) {
        self.history.dispatch(record);
    }
}

#[hook]
pub fn use_wheel_store_provider() -> WheelStore {
    let pool = use_state(load_prize_pool);
    let config = use_state(load_wheel_config);
    let history = use_reducer(DrawHistory::default);

    let commit_pool = {
        let pool = pool.clone();
        Callback::from(move |next: PrizePool| {
            save_prize_pool(&next);
            log::info!("Prize pool replaced ({} prizes)", next.len());
            pool.set(next);
        })
    };

    WheelStore {
        pool: (*pool).clone(),
        config: *config,
        history,
        commit_pool,
    }
}

/// The store provided by `App`, if any.
#[hook]
pub fn use_wheel_store() -> Option<WheelStore> {
    let store = use_context::<WheelStore>();
    if store.is_none() {
        log::error!("use_wheel_store called outside of the wheel store provider");
    }
    store
}
