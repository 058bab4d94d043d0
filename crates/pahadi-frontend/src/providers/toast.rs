use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

const TOAST_MILLIS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: Option<String>,
    pub description: String,
}

impl Toast {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            title: None,
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            title: None,
            description: description.into(),
        }
    }

    pub fn info(description: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            title: None,
            description: description.into(),
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

pub enum ToastAction {
    Push(usize, Toast),
    Dismiss(usize),
}

/// Visible toasts, oldest first.
#[derive(Debug, Default, PartialEq)]
pub struct Toasts {
    pub items: Vec<(usize, Toast)>,
}

impl Reducible for Toasts {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut items = self.items.clone();
        match action {
            ToastAction::Push(id, toast) => items.push((id, toast)),
            ToastAction::Dismiss(id) => items.retain(|(item, _)| *item != id),
        }
        Rc::new(Toasts { items })
    }
}

#[derive(Clone, PartialEq)]
pub struct ToastContext {
    pub push: Callback<Toast>,
}

impl ToastContext {
    pub fn show(&self, toast: Toast) {
        self.push.emit(toast);
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let toasts = use_reducer(Toasts::default);
    let next_id = use_mut_ref(|| 0usize);

    let push = {
        let toasts = toasts.clone();
        Callback::from(move |toast: Toast| {
            let id = {
                let mut next_id = next_id.borrow_mut();
                *next_id += 1;
                *next_id
            };
            toasts.dispatch(ToastAction::Push(id, toast));

            let toasts = toasts.clone();
            Timeout::new(TOAST_MILLIS, move || {
                toasts.dispatch(ToastAction::Dismiss(id));
            })
            .forget();
        })
    };

    let dismiss = {
        let toasts = toasts.clone();
        move |id: usize| {
            let toasts = toasts.clone();
            Callback::from(move |_: MouseEvent| toasts.dispatch(ToastAction::Dismiss(id)))
        }
    };

    html! {
        <ContextProvider<ToastContext> context={ToastContext { push }}>
            {props.children.clone()}
            <div class="fixed bottom-4 right-4 z-50 flex flex-col space-y-2 w-80">
                {
                    toasts.items.iter().map(|(id, toast)| {
                        let style = match toast.kind {
                            ToastKind::Success => "bg-green-50 border-green-300 text-green-800",
                            ToastKind::Error => "bg-red-50 border-red-300 text-red-800",
                            ToastKind::Info => "bg-white border-gray-200 text-gray-800",
                        };
                        html! {
                            <div key={*id} class={classes!("border", "rounded-lg", "shadow", "p-4", "flex", "justify-between", style)}>
                                <div>
                                    if let Some(title) = &toast.title {
                                        <p class="font-semibold">{ title }</p>
                                    }
                                    <p class="text-sm">{ &toast.description }</p>
                                </div>
                                <button class="ml-4 text-sm opacity-60 hover:opacity-100" onclick={dismiss(*id)}>{ "✕" }</button>
                            </div>
                        }
                    }).collect::<Html>()
                }
            </div>
        </ContextProvider<ToastContext>>
    }
}

#[hook]
pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("use_toast must be used within a ToastProvider")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let toasts = Rc::new(Toasts::default());
        let toasts = toasts.reduce(ToastAction::Push(1, Toast::success("OTP sent")));
        let toasts = toasts.reduce(ToastAction::Push(
            2,
            Toast::error("Invalid OTP").titled("Error"),
        ));

        assert_eq!(toasts.items.len(), 2);
        assert_eq!(toasts.items[1].1.title.as_deref(), Some("Error"));

        let toasts = toasts.reduce(ToastAction::Dismiss(1));
        assert_eq!(toasts.items.len(), 1);
        assert_eq!(toasts.items[0].1.description, "Invalid OTP");

        // Dismissing twice is harmless
        let toasts = toasts.reduce(ToastAction::Dismiss(1));
        assert_eq!(toasts.items.len(), 1);
        assert_eq!(toasts.items[0].1.kind, ToastKind::Error);
    }
}
