use shared::Booking;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Clone, PartialEq)]
pub struct BookingsState {
    pub bookings: Vec<Booking>,
    pub loading: bool,
    /// Set when the list could not be loaded; blocks the whole page
    pub load_error: Option<String>,
}

pub struct UseBookingsResult {
    pub state: BookingsState,
    pub refresh: Callback<()>,
}

/// Booking list loaded on mount and reloaded through `refresh`
#[hook]
pub fn use_bookings(api_client: &ApiClient) -> UseBookingsResult {
    let bookings = use_state(Vec::<Booking>::new);
    let loading = use_state(|| true);
    let load_error = use_state(|| None::<String>);

    let refresh = {
        let api_client = api_client.clone();
        let bookings = bookings.clone();
        let loading = loading.clone();
        let load_error = load_error.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let bookings = bookings.clone();
            let loading = loading.clone();
            let load_error = load_error.clone();

            spawn_local(async move {
                loading.set(true);

                match api_client.list_bookings().await {
                    Ok(list) => {
                        bookings.set(list);
                        load_error.set(None);
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to load bookings:", format!("{:?}", e));
                        bookings.set(Vec::new());
                        load_error.set(Some(e.user_message().to_string()));
                    }
                }

                loading.set(false);
            });
        })
    };

    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    let state = BookingsState {
        bookings: (*bookings).clone(),
        loading: *loading,
        load_error: (*load_error).clone(),
    };

    UseBookingsResult { state, refresh }
}
