use std::collections::HashMap;

use web_sys::HtmlInputElement;
use yew::prelude::*;

use pahadi::id::MessageId;

#[derive(Debug, Clone, PartialEq)]
struct Conversation {
    id: u32,
    name: &'static str,
    last_message: &'static str,
    time: &'static str,
    unread: u32,
    online: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct ChatMessage {
    id: MessageId,
    from_me: bool,
    text: String,
    time: String,
}

fn conversations() -> Vec<Conversation> {
    vec![
        Conversation { id: 1, name: "Priya Sharma", last_message: "That sounds great!", time: "2m ago", unread: 2, online: true },
        Conversation { id: 2, name: "Rahul Verma", last_message: "See you tomorrow!", time: "1h ago", unread: 0, online: false },
        Conversation { id: 3, name: "Ananya Patel", last_message: "Thank you so much!", time: "3h ago", unread: 1, online: true },
        Conversation { id: 4, name: "Arjun Singh", last_message: "What do you think?", time: "1d ago", unread: 0, online: false },
    ]
}

fn opening_thread() -> Vec<ChatMessage> {
    [
        (false, "Hi! I saw your profile and would love to connect.", "10:30 AM"),
        (true, "Hello! Thank you for reaching out. I'd love to know more about you.", "10:32 AM"),
        (false, "Sure! I work as a software engineer and love hiking on weekends.", "10:35 AM"),
        (true, "That's amazing! I also enjoy outdoor activities.", "10:37 AM"),
        (false, "We should plan a hike sometime!", "10:40 AM"),
        (true, "That sounds great!", "10:42 AM"),
    ]
    .into_iter()
    .map(|(from_me, text, time)| ChatMessage {
        id: MessageId::generate(),
        from_me,
        text: text.to_string(),
        time: time.to_string(),
    })
    .collect()
}

/// A message typed locally, or nothing if the input is blank.
fn compose(text: &str, time: String) -> Option<ChatMessage> {
    let text = text.trim();
    (!text.is_empty()).then(|| ChatMessage {
        id: MessageId::generate(),
        from_me: true,
        text: text.to_string(),
        time,
    })
}

fn matches_search(conversation: &Conversation, query: &str) -> bool {
    conversation
        .name
        .to_lowercase()
        .contains(&query.trim().to_lowercase())
}

fn clock_time() -> String {
    let now = js_sys::Date::new_0();
    let hours = now.get_hours();
    let suffix = if hours >= 12 { "PM" } else { "AM" };
    let hours = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{hours}:{:02} {suffix}", now.get_minutes())
}

/// Conversation list and message thread. Sending is local until the backend has chat endpoints.
#[function_component(ChatPage)]
pub fn chat_page() -> Html {
    let conversations = use_memo((), |_| conversations());
    let selected = use_state(|| 1u32);
    let search = use_state(String::new);
    let draft = use_state(String::new);
    let threads = use_state(|| HashMap::from([(1u32, opening_thread())]));

    let send = {
        let selected = selected.clone();
        let draft = draft.clone();
        let threads = threads.clone();
        Callback::from(move |_: ()| {
            if let Some(message) = compose(&draft, clock_time()) {
                let mut next = (*threads).clone();
                next.entry(*selected).or_default().push(message);
                threads.set(next);
                draft.set(String::new());
            }
        })
    };

    let on_draft_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                draft.set(input.value());
            }
        })
    };

    let on_keypress = {
        let send = send.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                send.emit(());
            }
        })
    };

    let on_search_input = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                search.set(input.value());
            }
        })
    };

    let current = conversations.iter().find(|c| c.id == *selected).cloned();
    let empty = Vec::new();
    let messages = threads.get(&*selected).unwrap_or(&empty);

    html! {
        <div class="max-w-7xl mx-auto">
            <h1 class="text-3xl font-bold bg-gradient-to-r from-red-600 to-orange-600 bg-clip-text text-transparent mb-6 font-serif">
                { "संदेश (Messages)" }
            </h1>

            <div class="grid md:grid-cols-3 gap-4 h-[calc(100vh-14rem)]">
                <div class="md:col-span-1 p-4 overflow-y-auto bg-white rounded-xl border-2 border-red-100">
                    <input
                        class="w-full mb-4 px-3 py-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-red-500"
                        placeholder="Search conversations..."
                        value={(*search).clone()}
                        oninput={on_search_input}
                    />
                    <div class="space-y-2">
                        {
                            for conversations.iter().filter(|c| matches_search(c, &search)).map(|conversation| {
                                let id = conversation.id;
                                let onclick = {
                                    let selected = selected.clone();
                                    Callback::from(move |_: MouseEvent| selected.set(id))
                                };
                                let active = id == *selected;
                                html! {
                                    <div
                                        key={id}
                                        class={classes!("p-3", "rounded-lg", "cursor-pointer", "flex", "justify-between",
                                            if active { "bg-red-50 border-2 border-red-200" } else { "hover:bg-gray-50" })}
                                        {onclick}
                                    >
                                        <div>
                                            <p class="font-semibold text-gray-900">
                                                { conversation.name }
                                                if conversation.online {
                                                    <span class="ml-2 inline-block w-2 h-2 rounded-full bg-green-500"></span>
                                                }
                                            </p>
                                            <p class="text-sm text-gray-600 truncate">{ conversation.last_message }</p>
                                        </div>
                                        <div class="text-right">
                                            <p class="text-xs text-gray-500">{ conversation.time }</p>
                                            if conversation.unread > 0 && !active {
                                                <span class="inline-block mt-1 px-2 text-xs bg-red-600 text-white rounded-full">{ conversation.unread }</span>
                                            }
                                        </div>
                                    </div>
                                }
                            })
                        }
                    </div>
                </div>

                <div class="md:col-span-2 flex flex-col bg-white rounded-xl border-2 border-red-100">
                    if let Some(conversation) = current {
                        <div class="p-4 border-b border-red-100">
                            <p class="font-semibold text-gray-900">{ conversation.name }</p>
                            <p class="text-xs text-gray-500">{ if conversation.online { "Online" } else { "Offline" } }</p>
                        </div>
                    }
                    <div class="flex-1 p-4 overflow-y-auto space-y-2">
                        {
                            for messages.iter().map(|message| html! {
                                <div key={message.id.as_str()} class={if message.from_me { "text-right" } else { "text-left" }}>
                                    <div class={classes!("inline-block", "px-4", "py-2", "rounded-2xl", "max-w-xs",
                                        if message.from_me { "bg-gradient-to-r from-red-600 to-orange-600 text-white" } else { "bg-gray-100 text-gray-900" })}>
                                        <p>{ &message.text }</p>
                                        <p class="text-xs opacity-70 mt-1">{ &message.time }</p>
                                    </div>
                                </div>
                            })
                        }
                    </div>
                    <div class="p-4 border-t border-red-100 flex space-x-2">
                        <input
                            type="text"
                            class="flex-1 px-3 py-2 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-red-500"
                            placeholder="Type a message..."
                            value={(*draft).clone()}
                            oninput={on_draft_input}
                            onkeypress={on_keypress}
                        />
                        <button
                            class="px-4 py-2 bg-gradient-to-r from-red-600 to-orange-600 text-white rounded hover:opacity-90"
                            onclick={send.reform(|_: MouseEvent| ())}
                        >
                            { "Send" }
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_trims_and_rejects_blank() {
        let message = compose("  Namaste!  ", "9:05 AM".to_string()).unwrap();
        assert_eq!(message.text, "Namaste!");
        assert!(message.from_me);
        assert_eq!(message.time, "9:05 AM");

        assert!(compose("   ", "9:05 AM".to_string()).is_none());
    }

    #[test]
    fn test_composed_messages_get_distinct_ids() {
        let a = compose("one", String::new()).unwrap();
        let b = compose("two", String::new()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let all = conversations();
        let found: Vec<&str> = all
            .iter()
            .filter(|c| matches_search(c, " priya "))
            .map(|c| c.name)
            .collect();
        assert_eq!(found, vec!["Priya Sharma"]);
        assert_eq!(all.iter().filter(|c| matches_search(c, "")).count(), 4);
    }
}
