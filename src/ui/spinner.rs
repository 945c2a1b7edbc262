use leptos::prelude::*;

#[derive(Clone, Copy, PartialEq)]
pub enum SpinnerSize {
    Small,
    Medium,
    Large,
}

impl SpinnerSize {
    fn class(&self) -> &'static str {
        match self {
            SpinnerSize::Small => "h-4 w-4 border-2",
            SpinnerSize::Medium => "h-8 w-8 border-4",
            SpinnerSize::Large => "h-12 w-12 border-4",
        }
    }
}

/// Loading spinner component
#[component]
pub fn Spinner(
    #[prop(default = SpinnerSize::Medium)] size: SpinnerSize,
    /// Optional label text
    #[prop(default = String::new())]
    label: String,
    #[prop(default = false)] centered: bool,
) -> impl IntoView {
    let container_class = if centered {
        "flex flex-col items-center justify-center gap-3 py-12"
    } else {
        "inline-flex items-center gap-2"
    };

    view! {
        <div class=container_class>
            <div
                class=format!("animate-spin rounded-full border-blue-600 border-t-transparent {}", size.class())
                role="status"
                aria-live="polite"
            >
                <span class="sr-only">"Loading..."</span>
            </div>
            {(!label.is_empty()).then(|| view! {
                <div class="text-sm text-gray-500">{label.clone()}</div>
            })}
        </div>
    }
}

/// Centered spinner with a message
#[component]
pub fn LoadingSpinner(#[prop(default = String::new())] message: String) -> impl IntoView {
    view! { <Spinner size=SpinnerSize::Large label=message centered=true /> }
}
