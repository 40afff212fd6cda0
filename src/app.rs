use yew::prelude::*;

use crate::components::TaskPanel;
use crate::config::HubConfig;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    #[prop_or_default]
    pub config: HubConfig,
}

#[derive(Properties, PartialEq)]
pub struct WidgetProps {
    pub title: AttrValue,
    pub children: Children,
}

#[function_component(Widget)]
pub fn widget(props: &WidgetProps) -> Html {
    html! {
        <section class="widget">
            <h2 class="widget-title">{ props.title.clone() }</h2>
            { for props.children.iter() }
        </section>
    }
}

// Main App Component
#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let config = &props.config;

    html! {
        <main class="script-hub">
            <h1>{ config.title.clone() }</h1>
            { for config.tasks.iter().map(|task| html! {
                <Widget key={task.id.clone()} title={task.title.clone()}>
                    <TaskPanel task={task.clone()} />
                </Widget>
            }) }
        </main>
    }
}
