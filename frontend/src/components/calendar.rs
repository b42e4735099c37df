use yew::prelude::*;
use shared::{Appointment, CalendarDayType, CalendarMonth};

const WEEKDAYS: [&str; 7] = ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"];

#[derive(Properties, PartialEq)]
pub struct CalendarProps {
    pub calendar_data: CalendarMonth,
    pub selected_day: Option<u32>,
    pub on_select_day: Callback<u32>,
    pub on_select_appointment: Callback<Appointment>,
}

#[function_component(Calendar)]
pub fn calendar(props: &CalendarProps) -> Html {
    let calendar_days = props.calendar_data.days.iter().map(|day_data| {
        if day_data.day_type != CalendarDayType::MonthDay {
            return html! { <div class="calendar-day empty"></div> };
        }

        let day = day_data.day;
        let mut day_class = classes!("calendar-day");
        if day_data.is_today {
            day_class.push("today");
        }
        if props.selected_day == Some(day) {
            day_class.push("selected");
        }

        let on_select_day = props.on_select_day.clone();

        html! {
            <div class={day_class} onclick={Callback::from(move |_: MouseEvent| on_select_day.emit(day))}>
                <div class="day-header">
                    <div class="day-number">{day}</div>
                    {if !day_data.appointments.is_empty() {
                        html! { <div class="day-count">{day_data.appointments.len()}</div> }
                    } else { html! {} }}
                </div>

                <div class="day-appointments">
                    {for day_data.appointments.iter().map(|appointment| {
                        let tooltip = format!(
                            "{} · {}\n{}\n{}",
                            appointment.time,
                            appointment.status.label(),
                            appointment.client_name,
                            appointment.service_name
                        );
                        let on_select = props.on_select_appointment.clone();
                        let selected = appointment.clone();
                        html! {
                            <div
                                class={format!("appointment-chip {}", appointment.status.as_str())}
                                title={tooltip}
                                onclick={Callback::from(move |e: MouseEvent| {
                                    e.stop_propagation();
                                    on_select.emit(selected.clone());
                                })}
                            >
                                <span class="chip-time">{&appointment.time}</span>
                                <span class="chip-client">{&appointment.client_name}</span>
                            </div>
                        }
                    })}
                </div>
            </div>
        }
    });

    html! {
        <div class="calendar">
            <div class="calendar-weekdays">
                {for WEEKDAYS.iter().map(|name| html! { <div class="weekday">{*name}</div> })}
            </div>
            <div class="calendar-grid">
                {for calendar_days}
            </div>
        </div>
    }
}
