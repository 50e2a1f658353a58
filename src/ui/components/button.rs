//! Button component.

use leptos::prelude::*;

/// Button size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonSize {
    #[default]
    Md,
    /// Square icon-only button.
    Icon,
}

impl ButtonSize {
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Md => "h-11 px-4 text-sm",
            Self::Icon => "h-11 w-11",
        }
    }
}

/// Styled `<button>`.
///
/// ```rust,ignore
/// view! {
///     <Button button_type="submit" size=ButtonSize::Icon>
///         <SendIcon />
///     </Button>
/// }
/// ```
#[component]
pub fn Button(
    #[prop(default = ButtonSize::Md)] size: ButtonSize,
    /// `type` attribute of the element.
    #[prop(default = "button")]
    button_type: &'static str,
    #[prop(default = "")] class: &'static str,
    children: Children,
) -> impl IntoView {
    let classes = format!(
        "inline-flex shrink-0 items-center justify-center rounded-xl font-medium \
         transition-all focus-visible:outline-none focus-visible:ring-2 \
         focus-visible:ring-blue-400 bg-blue-600 text-white hover:bg-blue-500 \
         active:scale-95 {} {}",
        size.classes(),
        class
    );

    view! {
        <button type=button_type class=classes>
            {children()}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_submit_button() {
        let html = view! {
            <Button button_type="submit" size=ButtonSize::Icon>
                "Send"
            </Button>
        }
        .to_html();
        assert!(html.contains(r#"type="submit""#));
        assert!(html.contains("bg-blue-600"));
        assert!(html.contains("h-11 w-11"));
        assert!(!html.contains("bg-transparent"));
    }
}
