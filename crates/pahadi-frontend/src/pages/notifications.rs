use yew::prelude::*;

use crate::providers::{Toast, use_toast};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NotificationKind {
    Interest,
    View,
    Message,
    Match,
}

impl NotificationKind {
    fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Interest => "♥",
            NotificationKind::View => "👁",
            NotificationKind::Message => "💬",
            NotificationKind::Match => "✨",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Notification {
    id: u32,
    kind: NotificationKind,
    name: &'static str,
    message: &'static str,
    time: &'static str,
    unread: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingInterest {
    id: u32,
    name: &'static str,
    age: u32,
    location: &'static str,
    time: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    All,
    Interests,
}

fn sample_notifications() -> Vec<Notification> {
    vec![
        Notification { id: 1, kind: NotificationKind::Interest, name: "Priya Sharma", message: "expressed interest in your profile", time: "5m ago", unread: true },
        Notification { id: 2, kind: NotificationKind::View, name: "Rahul Verma", message: "viewed your profile", time: "1h ago", unread: true },
        Notification { id: 3, kind: NotificationKind::Message, name: "Ananya Patel", message: "sent you a message", time: "3h ago", unread: false },
        Notification { id: 4, kind: NotificationKind::Match, name: "Arjun Singh", message: "is a new match for you", time: "1d ago", unread: false },
    ]
}

fn sample_interests() -> Vec<PendingInterest> {
    vec![
        PendingInterest { id: 1, name: "Priya Sharma", age: 26, location: "Dehradun", time: "5m ago" },
        PendingInterest { id: 2, name: "Kavya Negi", age: 25, location: "Nainital", time: "2h ago" },
    ]
}

fn mark_all_read(notifications: &[Notification]) -> Vec<Notification> {
    notifications
        .iter()
        .map(|n| Notification { unread: false, ..n.clone() })
        .collect()
}

fn without_interest(interests: &[PendingInterest], id: u32) -> Vec<PendingInterest> {
    interests.iter().filter(|i| i.id != id).cloned().collect()
}

#[function_component(NotificationsPage)]
pub fn notifications_page() -> Html {
    let toasts = use_toast();
    let notifications = use_state(sample_notifications);
    let interests = use_state(sample_interests);
    let tab = use_state(|| Tab::All);

    let unread = notifications.iter().filter(|n| n.unread).count();

    let on_mark_all = {
        let notifications = notifications.clone();
        Callback::from(move |_: MouseEvent| notifications.set(mark_all_read(&notifications)))
    };

    let respond = |id: u32, accepted: bool| {
        let interests = interests.clone();
        let toasts = toasts.clone();
        Callback::from(move |_: MouseEvent| {
            interests.set(without_interest(&interests, id));
            let toast = if accepted {
                Toast::success("You can now start chatting").titled("Interest Accepted!")
            } else {
                Toast::info("Interest declined")
            };
            toasts.show(toast);
        })
    };

    let tab_button = |target: Tab, label: String| {
        let tab = tab.clone();
        let active = *tab == target;
        let onclick = Callback::from(move |_: MouseEvent| tab.set(target));
        html! {
            <button
                class={classes!("px-4", "py-2", "rounded-lg", "font-medium",
                    if active { "bg-red-600 text-white" } else { "bg-white text-gray-700 border border-red-100" })}
                {onclick}
            >
                { label }
            </button>
        }
    };

    let body = match *tab {
        Tab::All => html! {
            <div class="space-y-2">
                {
                    for notifications.iter().map(|n| html! {
                        <div
                            key={n.id}
                            class={classes!("p-4", "rounded-xl", "border-2", "flex", "items-center", "space-x-3",
                                if n.unread { "bg-red-50 border-red-200" } else { "bg-white border-red-100" })}
                        >
                            <span class="text-2xl">{ n.kind.icon() }</span>
                            <div class="flex-1">
                                <p class="text-gray-900">
                                    <span class="font-semibold">{ n.name }</span>{ " " }{ n.message }
                                </p>
                                <p class="text-xs text-gray-500">{ n.time }</p>
                            </div>
                            if n.unread {
                                <span class="w-2 h-2 rounded-full bg-red-600"></span>
                            }
                        </div>
                    })
                }
            </div>
        },
        Tab::Interests if interests.is_empty() => html! {
            <p class="text-center text-gray-500 py-12">{ "No pending interests" }</p>
        },
        Tab::Interests => html! {
            <div class="space-y-2">
                {
                    for interests.iter().map(|interest| html! {
                        <div key={interest.id} class="p-4 bg-white rounded-xl border-2 border-red-100 flex items-center justify-between">
                            <div>
                                <p class="font-semibold text-gray-900">{ format!("{}, {}", interest.name, interest.age) }</p>
                                <p class="text-sm text-gray-600">{ interest.location }</p>
                                <p class="text-xs text-gray-500">{ interest.time }</p>
                            </div>
                            <div class="flex space-x-2">
                                <button
                                    class="px-3 py-1 bg-gradient-to-r from-red-600 to-orange-600 text-white rounded-md"
                                    onclick={respond(interest.id, true)}
                                >
                                    { "Accept" }
                                </button>
                                <button
                                    class="px-3 py-1 border-2 border-gray-300 text-gray-700 rounded-md"
                                    onclick={respond(interest.id, false)}
                                >
                                    { "Decline" }
                                </button>
                            </div>
                        </div>
                    })
                }
            </div>
        },
    };

    html! {
        <div class="max-w-3xl mx-auto">
            <div class="flex items-center justify-between mb-6">
                <h1 class="text-3xl font-bold bg-gradient-to-r from-red-600 to-orange-600 bg-clip-text text-transparent font-serif">
                    { "सूचनाएं (Notifications)" }
                </h1>
                if unread > 0 {
                    <button class="text-sm text-red-700 hover:underline" onclick={on_mark_all}>
                        { "Mark all read" }
                    </button>
                }
            </div>
            <div class="flex space-x-2 mb-4">
                { tab_button(Tab::All, format!("All ({unread} unread)")) }
                { tab_button(Tab::Interests, format!("Interests ({})", interests.len())) }
            </div>
            { body }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_all_read() {
        let notifications = sample_notifications();
        assert!(notifications.iter().any(|n| n.unread));

        let read = mark_all_read(&notifications);
        assert_eq!(read.len(), notifications.len());
        assert!(read.iter().all(|n| !n.unread));
    }

    #[test]
    fn test_responding_removes_only_that_interest() {
        let remaining = without_interest(&sample_interests(), 1);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Kavya Negi");

        assert_eq!(without_interest(&remaining, 99), remaining);
    }
}
