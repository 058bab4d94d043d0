use yew::prelude::*;

use pahadi::data::Profile;

#[derive(Properties, PartialEq)]
pub struct ProfileCardProps {
    pub profile: Profile,
    #[prop_or_default]
    pub children: Children,
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

#[function_component(ProfileCard)]
pub fn profile_card(props: &ProfileCardProps) -> Html {
    let profile = &props.profile;
    let data = &profile.data;

    let facts: Vec<(&str, Option<String>)> = vec![
        ("📍", profile.location()),
        ("💼", data.occupation.clone()),
        ("🎓", data.education.clone()),
        ("🗣️", data.mother_tongue.clone()),
        ("🛕", data.religion.clone()),
    ];

    html! {
        <div class="bg-white rounded-2xl shadow-xl border-2 border-red-100 overflow-hidden">
            <div class="relative h-80 bg-gradient-to-br from-red-100 to-orange-100 flex items-center justify-center">
                {
                    match profile.photos.first() {
                        Some(photo) => html! {
                            <img class="w-full h-full object-cover" src={photo.clone()} alt={profile.display_name().to_string()} />
                        },
                        None => html! {
                            <span class="text-6xl font-bold text-red-400">{ initials(profile.display_name()) }</span>
                        },
                    }
                }
                <div class="absolute top-3 right-3 flex space-x-2">
                    if profile.verified {
                        <span class="px-2 py-1 text-xs bg-green-600 text-white rounded-full">{ "✓ Verified" }</span>
                    }
                    if profile.premium {
                        <span class="px-2 py-1 text-xs bg-amber-500 text-white rounded-full">{ "★ Premium" }</span>
                    }
                </div>
            </div>

            <div class="p-6 space-y-3">
                <h2 class="text-2xl font-bold text-gray-900 font-serif">{ profile.display_name() }</h2>
                <ul class="space-y-1 text-gray-700">
                    {
                        facts.into_iter().filter_map(|(icon, fact)| fact.map(|fact| html! {
                            <li class="flex items-center space-x-2">
                                <span>{ icon }</span>
                                <span>{ fact }</span>
                            </li>
                        })).collect::<Html>()
                    }
                </ul>
                if let Some(bio) = &data.bio {
                    <p class="text-gray-600 italic">{ bio }</p>
                }
                if let Some(interests) = &data.interests {
                    <div class="flex flex-wrap gap-2">
                        { for interests.iter().map(|interest| html! {
                            <span class="px-3 py-1 text-sm bg-red-50 text-red-700 rounded-full">{ interest }</span>
                        }) }
                    </div>
                }
                { props.children.clone() }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("asha rawat"), "AR");
        assert_eq!(initials("Kiran"), "K");
        assert_eq!(initials("Meera Devi Negi"), "MD");
    }
}
