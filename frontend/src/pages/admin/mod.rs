mod history_table;
mod prize_row;
mod stats;

use wheel_shared::history::summarize;
use wheel_shared::prize_editor::{PrizeEditor, PrizeUpdate};
use wheel_shared::WheelError;
use yew::prelude::*;

use crate::hooks::use_wheel_store;
use crate::styles;

use history_table::HistoryTable;
use prize_row::PrizeRow;
use stats::DistributionChart;

type Edit = Box<dyn FnOnce(&mut PrizeEditor) -> Result<(), WheelError>>;

#[function_component(Admin)]
pub fn admin() -> Html {
    let Some(store) = use_wheel_store() else {
        return html! {
            <div class={styles::CONTAINER_LG}>
                <div class={styles::ALERT_ERROR}>{"Wheel state is unavailable."}</div>
            </div>
        };
    };

    let editor = {
        let pool = store.pool.clone();
        use_state(move || PrizeEditor::from_pool(&pool))
    };
    let error_message = use_state(String::new);
    let saved = use_state(|| false);

    // Applies one edit to a copy of the working set; rejected edits leave it untouched
    let apply = {
        let editor = editor.clone();
        let error_message = error_message.clone();
        let saved = saved.clone();
        Callback::from(move |edit: Edit| {
            let mut next = (*editor).clone();
            match edit(&mut next) {
                Ok(()) => {
                    error_message.set(String::new());
                    saved.set(false);
                    editor.set(next);
                }
                Err(e) => {
                    log::warn!("Prize edit rejected: {}", e);
                    error_message.set(e.to_string());
                }
            }
        })
    };

    let on_update = {
        let apply = apply.clone();
        Callback::from(move |(index, update): (usize, PrizeUpdate)| {
            apply.emit(Box::new(move |editor| editor.update(index, update)));
        })
    };

    let on_weight = {
        let apply = apply.clone();
        Callback::from(move |(index, value): (usize, f64)| {
            apply.emit(Box::new(move |editor| editor.set_slider_weight(index, value)));
        })
    };

    let on_remove = {
        let apply = apply.clone();
        Callback::from(move |index: usize| {
            apply.emit(Box::new(move |editor| editor.remove(index).map(|_| ())));
        })
    };

    let on_add = {
        let apply = apply.clone();
        Callback::from(move |_: MouseEvent| {
            apply.emit(Box::new(|editor| editor.add_entry().map(|_| ())));
        })
    };

    let on_commit = {
        let editor = editor.clone();
        let error_message = error_message.clone();
        let saved = saved.clone();
        let commit_pool = store.commit_pool.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*editor).clone();
            match next.commit() {
                Ok(pool) => {
                    commit_pool.emit(pool);
                    error_message.set(String::new());
                    saved.set(true);
                    editor.set(next);
                }
                Err(e) => error_message.set(e.to_string()),
            }
        })
    };

    let on_reset = {
        let editor = editor.clone();
        let error_message = error_message.clone();
        let pool = store.pool.clone();
        Callback::from(move |_: MouseEvent| {
            error_message.set(String::new());
            editor.set(PrizeEditor::from_pool(&pool));
        })
    };

    let percentages = editor.percentages();
    let stats = summarize(&store.history.records);

    html! {
        <div class={styles::CONTAINER_LG}>
            <h1 class={classes!(styles::TEXT_H1, "mb-6")}>{"Wheel Admin"}</h1>

            if !error_message.is_empty() {
                <div class={classes!(styles::ALERT_ERROR, "mb-4")}>{&*error_message}</div>
            }
            if *saved {
                <div class={classes!(styles::ALERT_SUCCESS, "mb-4")}>{"Prizes saved."}</div>
            }

            <div class={classes!(styles::CARD, "mb-8")}>
                <div class="flex items-center justify-between mb-4">
                    <h2 class={styles::TEXT_H2}>{"Prizes"}</h2>
                    <span class={styles::TEXT_SMALL}>
                        {format!("Total weight {:.0}", editor.total_weight())}
                    </span>
                </div>

                { for editor.entries().iter().zip(percentages).enumerate().map(|(index, (entry, percent))| html! {
                    <PrizeRow
                        key={index}
                        index={index}
                        entry={entry.clone()}
                        percent={percent}
                        on_update={on_update.clone()}
                        on_weight={on_weight.clone()}
                        on_remove={on_remove.clone()}
                    />
                }) }

                <div class="flex gap-3 mt-6">
                    <button class={styles::BUTTON_SECONDARY} onclick={on_add}>{"Add Prize"}</button>
                    <button class={styles::BUTTON_SECONDARY} onclick={on_reset} disabled={!editor.is_dirty()}>
                        {"Discard Changes"}
                    </button>
                    <button class={styles::BUTTON_PRIMARY} onclick={on_commit} disabled={!editor.is_dirty()}>
                        {"Save Prizes"}
                    </button>
                </div>
            </div>

            <DistributionChart stats={stats} />
            <HistoryTable records={store.history.records.clone()} />
        </div>
    }
}
