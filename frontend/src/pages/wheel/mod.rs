mod wheel_canvas;
mod wheel_utils;

use gloo_render::request_animation_frame;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use wheel_shared::constants::RECENT_WINNERS_LIMIT;
use wheel_shared::history::{recent, DrawRecord};
use wheel_shared::{SpinOutcome, SpinPhase, WheelController};
use yew::prelude::*;

use crate::hooks::use_wheel_store;
use crate::styles;

use wheel_canvas::WheelCanvas;
use wheel_utils::{PrizeLegend, ResultDisplay, SpinButton, WinnersList};

const GUEST_NAME: &str = "Guest";

#[function_component(LuckyWheel)]
pub fn lucky_wheel() -> Html {
    let Some(store) = use_wheel_store() else {
        return html! {
            <div class={styles::CONTAINER_LG}>
                <div class={styles::ALERT_ERROR}>{"Wheel state is unavailable."}</div>
            </div>
        };
    };

    let controller = {
        let pool = store.pool.clone();
        let config = store.config;
        use_mut_ref(move || match WheelController::new(pool, config) {
            Ok(wheel) => Some(wheel),
            Err(e) => {
                log::error!("Failed to set up the wheel: {}", e);
                None
            }
        })
    };
    let frame = use_state(|| 0u64);
    let is_spinning = use_state(|| false);
    let revealed = use_state(|| None::<(SpinOutcome, String)>);
    let error_message = use_state(String::new);
    let username = use_state(String::new);
    let selected_prize = use_state(String::new);

    // Pick up a pool committed from the admin page
    {
        let controller = controller.clone();
        let frame = frame.clone();
        use_effect_with(store.pool.clone(), move |pool| {
            if let Some(wheel) = controller.borrow_mut().as_mut() {
                if wheel.pool() != pool {
                    match wheel.replace_pool(pool.clone()) {
                        Ok(()) => frame.set(*frame + 1),
                        Err(e) => log::warn!("Keeping the previous prize pool: {}", e),
                    }
                }
            }
        });
    }

    // One controller tick per display frame while a spin is in flight
    {
        let controller = controller.clone();
        let frame_handle = frame.clone();
        let spinning_handle = is_spinning.clone();
        let error_message = error_message.clone();
        use_effect_with((*is_spinning, *frame), move |(spinning, _)| {
            let pending = spinning.then(|| {
                request_animation_frame(move |_| {
                    let update = match controller.borrow_mut().as_mut() {
                        Some(wheel) => wheel.tick(js_sys::Date::now()),
                        None => return,
                    };

                    match update {
                        Ok(update) if update.phase == SpinPhase::Animating => {
                            frame_handle.set(*frame_handle + 1);
                        }
                        Ok(_) => spinning_handle.set(false),
                        Err(e) => {
                            log::error!("Spin failed to settle: {}", e);
                            error_message.set(e.to_string());
                            spinning_handle.set(false);
                        }
                    }
                })
            });

            move || drop(pending)
        });
    }

    let on_username = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_prize = {
        let selected_prize = selected_prize.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            selected_prize.set(select.value());
        })
    };

    let start_spin = {
        let controller = controller.clone();
        let is_spinning = is_spinning.clone();
        let revealed = revealed.clone();
        let error_message = error_message.clone();
        let username = username.clone();
        let selected_prize = selected_prize.clone();
        let store = store.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if selected_prize.is_empty() {
                error_message.set("Choose the prize announced for this draw.".to_string());
                return;
            }

            let request = match controller.borrow_mut().as_mut() {
                Some(wheel) => wheel.request_spin(selected_prize.as_str()),
                None => return,
            };

            let completion = match request {
                Ok(completion) => completion,
                Err(e) => {
                    if e.is_benign() {
                        log::debug!("Spin request ignored: {}", e);
                    } else {
                        error_message.set(e.to_string());
                    }
                    return;
                }
            };

            error_message.set(String::new());
            revealed.set(None);
            is_spinning.set(true);

            let winner = match username.trim() {
                "" => GUEST_NAME.to_string(),
                name => name.to_string(),
            };
            let revealed = revealed.clone();
            let store = store.clone();
            spawn_local(async move {
                match completion.await {
                    Ok(outcome) => {
                        let drawn_at = chrono::Utc::now().to_rfc3339();
                        store.record_draw(DrawRecord::new(winner.clone(), &outcome.prize, drawn_at));
                        revealed.set(Some((outcome, winner)));
                    }
                    Err(_) => log::warn!("Spin was abandoned before it settled"),
                }
            });
        })
    };

    let segments = controller
        .borrow()
        .as_ref()
        .map(WheelController::segments)
        .unwrap_or_default();
    let recent_winners: Vec<DrawRecord> = recent(&store.history.records, RECENT_WINNERS_LIMIT)
        .into_iter()
        .cloned()
        .collect();
    let (outcome, winner) = match &*revealed {
        Some((outcome, winner)) => (Some(outcome.clone()), winner.clone()),
        None => (None, String::new()),
    };

    html! {
        <div class="container mx-auto px-4 py-8">
            <h1 class="text-3xl font-bold mb-6 text-center text-gray-900 dark:text-white">
                <span class="bg-clip-text text-transparent bg-gradient-to-r from-yellow-400 to-orange-500">{"Lucky Wheel"}</span>
            </h1>

            <div class="bg-white dark:bg-gray-800 p-6 sm:p-8 rounded-2xl shadow-xl max-w-2xl mx-auto border border-gray-100 dark:border-gray-700">
                <div class="relative mx-auto mb-8 flex justify-center items-center">
                    <div class="w-full max-w-[450px] mx-auto">
                        <WheelCanvas segments={segments} is_spinning={*is_spinning} />
                    </div>
                </div>

                if !error_message.is_empty() {
                    <div class={classes!(styles::ALERT_ERROR, "mb-6", "text-center")}>{&*error_message}</div>
                }

                <form onsubmit={start_spin} class="flex flex-col items-center gap-4">
                    <div class="w-full max-w-[300px]">
                        <label class={styles::TEXT_LABEL} for="participant">{"Participant"}</label>
                        <input
                            id="participant"
                            class={styles::INPUT}
                            placeholder={GUEST_NAME}
                            value={(*username).clone()}
                            oninput={on_username}
                            disabled={*is_spinning}
                        />
                    </div>
                    <div class="w-full max-w-[300px]">
                        <label class={styles::TEXT_LABEL} for="prize">{"Announced prize"}</label>
                        <select id="prize" class={styles::INPUT} onchange={on_prize} disabled={*is_spinning}>
                            <option value="" selected={selected_prize.is_empty()}>{"Select a prize..."}</option>
                            { for store.pool.entries().iter().filter(|e| e.is_winnable()).map(|entry| html! {
                                <option
                                    value={entry.label().to_string()}
                                    selected={*selected_prize == entry.label()}
                                >
                                    {entry.label()}
                                </option>
                            }) }
                        </select>
                    </div>
                    <div class="w-full max-w-[300px]">
                        <SpinButton is_spinning={*is_spinning} disabled={selected_prize.is_empty()} />
                    </div>
                </form>

                <ResultDisplay outcome={outcome} username={winner} />

                <div class="mt-8 text-center bg-gray-50 dark:bg-gray-700/30 p-6 rounded-xl shadow-sm">
                    <h3 class="font-bold text-lg mb-3 text-gray-800 dark:text-gray-200">{"Prizes"}</h3>
                    <PrizeLegend pool={store.pool.clone()} />
                </div>
            </div>

            <div class="max-w-2xl mx-auto">
                <WinnersList records={recent_winners} />
            </div>
        </div>
    }
}
