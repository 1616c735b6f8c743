pub mod config;
pub mod hooks;
pub mod pages;
pub mod styles;

use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::{use_wheel_store_provider, WheelStore};
use crate::pages::{admin::Admin, wheel::LuckyWheel};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Wheel,
    #[at("/admin")]
    Admin,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[function_component(App)]
pub fn app() -> Html {
    let store = use_wheel_store_provider();

    html! {
        <BrowserRouter>
            <ContextProvider<WheelStore> context={store}>
                <div class="min-h-screen w-full bg-gray-50 dark:bg-gray-900">
                    <Nav />
                    <div class="mx-auto pt-16">
                        <Switch<Route> render={switch} />
                    </div>
                </div>
            </ContextProvider<WheelStore>>
        </BrowserRouter>
    }
}

#[function_component(Nav)]
fn nav() -> Html {
    html! {
        <nav class={styles::NAV}>
            <div class={styles::NAV_INNER}>
                <div class={styles::NAV_CONTENT}>
                    <Link<Route> to={Route::Wheel} classes={classes!(styles::NAV_BRAND)}>{"Lucky Wheel"}</Link<Route>>
                    <div class={styles::NAV_ITEMS}>
                        <Link<Route> to={Route::Wheel} classes={classes!(styles::NAV_LINK)}>{"Wheel"}</Link<Route>>
                        <Link<Route> to={Route::Admin} classes={classes!(styles::NAV_LINK)}>{"Admin"}</Link<Route>>
                    </div>
                </div>
            </div>
        </nav>
    }
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Wheel => html! { <LuckyWheel /> },
        Route::Admin => html! { <Admin /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::Wheel} /> },
    }
}
