use std::sync::Arc;

use dioxus::prelude::*;

use prakriti_core::model::{BackupFrequency, SystemSettings, UserId};
use services::{Session, Statistics, UserWithStatus};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::format_datetime;

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    statistics: Statistics,
    users: Vec<UserWithStatus>,
}

#[component]
pub fn AdminView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<Signal<Option<Session>>>();

    let Some(Session::Admin(_)) = session() else {
        return rsx! {
            div { class: "page",
                p { "Administrator access required." }
            }
        };
    };

    let admin = ctx.admin();
    let mut dashboard = use_resource(move || {
        let admin = admin.clone();
        async move {
            let statistics = admin.statistics().await.map_err(|_| ViewError::Unknown)?;
            let users = admin.list_users().await.map_err(|_| ViewError::Unknown)?;
            Ok(DashboardData { statistics, users })
        }
    });
    let state = view_state_from_resource(dashboard);

    rsx! {
        div { class: "page admin-page",
            h2 { "Admin Dashboard" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    StatisticsPanel { statistics: data.statistics }
                    UserTable {
                        users: data.users,
                        on_delete: move |id: UserId| {
                            let admin = ctx.admin();
                            spawn(async move {
                                if admin.delete_user(id).await.is_ok() {
                                    dashboard.restart();
                                }
                            });
                        },
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }

            SettingsPanel {}
            ExportPanel {}
        }
    }
}

#[component]
fn StatisticsPanel(statistics: Statistics) -> Element {
    let distribution = statistics.dosha_distribution;
    let growth = statistics.user_growth;

    rsx! {
        section { class: "stats-grid",
            div { class: "stat-card",
                h3 { "Users" }
                p { class: "stat-value", "{statistics.total_users}" }
            }
            div { class: "stat-card",
                h3 { "Completed assessments" }
                p { class: "stat-value", "{statistics.completed_assessments}" }
            }
            div { class: "stat-card",
                h3 { "Follow-ups" }
                p { class: "stat-value", "{statistics.total_follow_ups}" }
            }
        }
        section { class: "stats-detail",
            p {
                "Dosha distribution: Vata {distribution.vata} | Pitta {distribution.pitta} | Kapha {distribution.kapha}"
            }
            p {
                "New users: {growth.this_week} this week, {growth.this_month} this month, {growth.last_month} last month"
            }
            if let Some(ratings) = statistics.average_ratings {
                p {
                    "Average ratings: energy {ratings.energy:.1}, sleep {ratings.sleep:.1}, digestion {ratings.digestion:.1}"
                }
            }
        }
    }
}

#[component]
fn UserTable(users: Vec<UserWithStatus>, on_delete: EventHandler<UserId>) -> Element {
    rsx! {
        section { class: "user-table",
            h3 { "Registered users" }
            if users.is_empty() {
                p { "No users registered yet." }
            } else {
                table {
                    thead {
                        tr {
                            th { "Name" }
                            th { "Email" }
                            th { "Joined" }
                            th { "Dominant dosha" }
                            th { "Follow-ups" }
                            th { "" }
                        }
                    }
                    tbody {
                        for row in users {
                            tr {
                                td { "{row.user.name()}" }
                                td { "{row.user.email()}" }
                                td { "{format_datetime(row.user.joined_at())}" }
                                td {
                                    match row.result {
                                        Some(result) => result.dominant.display_name().to_string(),
                                        None => "Not assessed".to_string(),
                                    }
                                }
                                td { "{row.follow_up_count}" }
                                td {
                                    button {
                                        class: "danger",
                                        r#type: "button",
                                        onclick: {
                                            let id = row.user.id();
                                            move |_| on_delete.call(id)
                                        },
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SettingsPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let mut form = use_signal(SystemSettings::default);
    let mut loaded = use_signal(|| false);
    let mut status = use_signal(|| Option::<String>::None);

    let settings = ctx.settings();
    let resource = use_resource(move || {
        let settings = settings.clone();
        async move { settings.load().await.map_err(|_| ViewError::Unknown) }
    });
    let state = view_state_from_resource(resource);
    if let ViewState::Ready(current) = &state
        && !loaded()
    {
        form.set(current.clone());
        loaded.set(true);
    }

    let save = move |_| {
        let settings = ctx.settings();
        let next = form();
        spawn(async move {
            match settings.save(&next).await {
                Ok(()) => status.set(Some("Settings saved.".into())),
                Err(err) => status.set(Some(err.to_string())),
            }
        });
    };

    let form_value = form();

    rsx! {
        section { class: "settings-panel",
            h3 { "System settings" }
            if let Some(message) = status() {
                p { class: "form-status", "{message}" }
            }
            label { "Site name"
                input {
                    value: "{form_value.site_name}",
                    oninput: move |evt| {
                        let mut next = form();
                        next.site_name = evt.value();
                        form.set(next);
                    },
                }
            }
            label { class: "checkbox-row",
                input {
                    r#type: "checkbox",
                    checked: form_value.maintenance_mode,
                    onchange: move |evt| {
                        let mut next = form();
                        next.maintenance_mode = evt.checked();
                        form.set(next);
                    },
                }
                "Maintenance mode"
            }
            label { class: "checkbox-row",
                input {
                    r#type: "checkbox",
                    checked: form_value.registration_enabled,
                    onchange: move |evt| {
                        let mut next = form();
                        next.registration_enabled = evt.checked();
                        form.set(next);
                    },
                }
                "Registration enabled"
            }
            label { class: "checkbox-row",
                input {
                    r#type: "checkbox",
                    checked: form_value.email_notifications,
                    onchange: move |evt| {
                        let mut next = form();
                        next.email_notifications = evt.checked();
                        form.set(next);
                    },
                }
                "Email notifications"
            }
            label { "Max users per day"
                input {
                    r#type: "number",
                    min: "1",
                    value: "{form_value.max_users_per_day}",
                    oninput: move |evt| {
                        if let Ok(parsed) = evt.value().parse::<u32>() {
                            let mut next = form();
                            next.max_users_per_day = parsed;
                            form.set(next);
                        }
                    },
                }
            }
            label { "Session timeout (minutes)"
                input {
                    r#type: "number",
                    min: "1",
                    value: "{form_value.session_timeout_minutes}",
                    oninput: move |evt| {
                        if let Ok(parsed) = evt.value().parse::<u32>() {
                            let mut next = form();
                            next.session_timeout_minutes = parsed;
                            form.set(next);
                        }
                    },
                }
            }
            label { "Backup frequency"
                select {
                    value: "{form_value.backup_frequency}",
                    onchange: move |evt| {
                        if let Ok(parsed) = evt.value().parse::<BackupFrequency>() {
                            let mut next = form();
                            next.backup_frequency = parsed;
                            form.set(next);
                        }
                    },
                    option { value: "daily", "Daily" }
                    option { value: "weekly", "Weekly" }
                    option { value: "monthly", "Monthly" }
                }
            }
            button { class: "primary", r#type: "button", onclick: save, "Save settings" }
        }
    }
}

#[component]
fn ExportPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let mut payload = use_signal(String::new);
    let mut status = use_signal(|| Option::<String>::None);

    let export_service = ctx.export();
    let import_service = ctx.export();

    let export = move |_| {
        let export = Arc::clone(&export_service);
        spawn(async move {
            match export.export_json().await {
                Ok(json) => {
                    payload.set(json);
                    status.set(Some("Export ready below.".into()));
                }
                Err(_) => status.set(Some("Export failed.".into())),
            }
        });
    };

    let import = move |_| {
        let export = Arc::clone(&import_service);
        let json = payload();
        spawn(async move {
            match export.import_json(&json).await {
                Ok(report) => status.set(Some(format!(
                    "Imported {} users, {} results, {} follow-ups.",
                    report.users, report.results, report.follow_ups
                ))),
                Err(err) => status.set(Some(err.to_string())),
            }
        });
    };

    rsx! {
        section { class: "export-panel",
            h3 { "Data export / import" }
            if let Some(message) = status() {
                p { class: "form-status", "{message}" }
            }
            div { class: "export-actions",
                button { r#type: "button", onclick: export, "Export all data" }
                button { class: "danger", r#type: "button", onclick: import, "Import (replaces data)" }
            }
            textarea {
                class: "export-payload",
                value: "{payload}",
                oninput: move |evt| payload.set(evt.value()),
            }
        }
    }
}
