#[macro_export]
/// Define an async callback for Yew components.
///
/// Every listed variable is cloned into the callback and again into the spawned future,
/// so handles like `UseStateHandle` or an `Rc<Api>` can be used freely inside the body.
///
/// 1. Without an event parameter:
/// ```compile_fail
/// let load = async_callback!([api, profiles, error_msg] {
///     match api.list_profiles(1).await {
///         Ok(page) => profiles.set(page.profiles),
///         Err(err) => error_msg.set(Some(err.to_string())),
///     }
/// });
/// ```
///
/// 2. With an event parameter:
/// ```compile_fail
/// let on_like = async_callback!([api, toasts] |e: MouseEvent| {
///     let _ = e;
///     toasts.show(Toast::success("Interest sent"));
/// });
/// ```
///
/// The body runs after the event has been dispatched, so anything like
/// `prevent_default()` has to happen in a plain callback that then emits to this one.
macro_rules! async_callback {
    // Version with event parameter, matched first since a closure is also an `expr`
    ([$($var:ident),* $(,)?] |$event:ident $(: $event_ty:ty)?| $body:expr) => {
        {
            $(let $var = $var.clone();)*
            Callback::from(move |$event $(: $event_ty)?| {
                $(let $var = $var.clone();)*
                wasm_bindgen_futures::spawn_local(async move {
                    $body
                });
            })
        }
    };

    // Version without event parameter
    ([$($var:ident),* $(,)?] $body:expr) => {
        {
            $(let $var = $var.clone();)*
            Callback::from(move |_| {
                $(let $var = $var.clone();)*
                wasm_bindgen_futures::spawn_local(async move {
                    $body
                });
            })
        }
    };
}
