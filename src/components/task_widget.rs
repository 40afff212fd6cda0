use yew::prelude::*;

use crate::components::TerminalView;
use crate::config::{FieldKind, FieldSpec, TaskSpec};
use crate::stream::register_event_source;

#[derive(Properties, PartialEq)]
pub struct TaskPanelProps {
    pub task: TaskSpec,
}

/// Form plus terminal for one task, wired to the task's stream endpoint.
#[function_component(TaskPanel)]
pub fn task_panel(props: &TaskPanelProps) -> Html {
    let task = &props.task;
    let form_id = task.form_id();
    let terminal_id = task.terminal_id();

    {
        let form_id = form_id.clone();
        let terminal_id = terminal_id.clone();
        let endpoint = task.endpoint.clone();
        // Once per mount; both elements exist by the time effects run.
        use_effect_with_deps(
            move |_| {
                if let Err(err) = register_event_source(&form_id, &terminal_id, &endpoint) {
                    log::error!("could not wire task panel `{form_id}`: {err}");
                }
                || ()
            },
            (),
        );
    }

    html! {
        <div class="task-panel">
            <form id={form_id} class="task-form">
                { for task.fields.iter().map(field_control) }
                <button type="submit">{ "Run" }</button>
            </form>
            <TerminalView id={terminal_id} />
        </div>
    }
}

fn field_control(field: &FieldSpec) -> Html {
    let name = field.name.clone();
    let control = match &field.kind {
        FieldKind::Text {
            default,
            placeholder,
        } => html! {
            <input type="text" name={name} value={default.clone()} placeholder={placeholder.clone()} />
        },
        FieldKind::Number { default } => html! {
            <input type="number" name={name} value={default.map(|v| v.to_string()).unwrap_or_default()} />
        },
        FieldKind::Checkbox { checked } => html! {
            <input type="checkbox" name={name} checked={*checked} />
        },
        FieldKind::Select { options, default } => html! {
            <select name={name}>
                { for options.iter().map(|option| html! {
                    <option value={option.clone()} selected={default.as_ref() == Some(option)}>
                        { option.clone() }
                    </option>
                }) }
            </select>
        },
        FieldKind::Radio { options, default } => html! {
            <span class="radio-group">
                { for options.iter().map(|option| html! {
                    <label>
                        <input
                            type="radio"
                            name={name.clone()}
                            value={option.clone()}
                            checked={default.as_ref() == Some(option)}
                        />
                        { option.clone() }
                    </label>
                }) }
            </span>
        },
    };

    html! {
        <div class="field">
            <span class="field-label">{ field.label().to_owned() }</span>
            { control }
        </div>
    }
}
