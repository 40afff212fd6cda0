use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TerminalViewProps {
    pub id: AttrValue,
}

/// Empty viewport that the stream controller appends lines into.
///
/// Lines are written straight to the DOM, outside yew's virtual tree, so this
/// component must not re-render children of its own.
#[function_component(TerminalView)]
pub fn terminal_view(props: &TerminalViewProps) -> Html {
    html! {
        <div id={props.id.clone()} class="terminal" role="log" aria-live="polite"></div>
    }
}
