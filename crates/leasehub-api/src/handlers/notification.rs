//! Notification handlers: settings, test and production dispatch, history,
//! and the staff inbox.

use axum::Json;
use axum::extract::{Path, Query, State};

use leasehub_core::error::AppError;
use leasehub_entity::notification::{
    AlertCategory, AlertPriority, Channel, EventType, InternalNotification, NotificationType,
};
use leasehub_service::notification::{DispatchReport, HistoryQuery, TestContacts};

use crate::dto::request::{
    HistoryParams, InboxParams, SaveSettingsRequest, SendNotificationRequest,
    TestNotificationRequest,
};
use crate::dto::response::{
    ApiResponse, CountResponse, DispatchResponse, HistoryResponse, InboxResponse,
    SettingsResponse, SettingsSavedResponse,
};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Parse an optional query/body value with the type's `FromStr`.
fn parse_opt<T>(value: Option<&str>) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr<Err = AppError>,
{
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::parse)
        .transpose()
}

/// Turn a dispatch report into a response; nothing delivered is a 400 that
/// still lists the per-channel errors.
fn dispatch_response(
    report: DispatchReport,
    message: &str,
) -> Result<Json<ApiResponse<DispatchResponse>>, ApiError> {
    let errors = report.errors.clone();
    let report = report.into_result().map_err(|e| {
        ApiError::from(e).with_details(serde_json::json!({ "errors": errors }))
    })?;

    Ok(Json(ApiResponse::ok(DispatchResponse {
        message: message.to_string(),
        sent_channels: report.sent_channels,
        errors: report.errors,
    })))
}

/// GET /api/notifications/settings
pub async fn get_settings(State(state): State<AppState>) -> Json<ApiResponse<SettingsResponse>> {
    let settings = state.settings_store.get_settings().await;
    Json(ApiResponse::ok(SettingsResponse { settings }))
}

/// POST /api/notifications/settings
pub async fn save_settings(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SaveSettingsRequest>,
) -> Result<Json<ApiResponse<SettingsSavedResponse>>, ApiError> {
    state.settings_store.save_settings(&req.settings).await?;
    Ok(Json(ApiResponse::ok(SettingsSavedResponse {
        message: "Notification settings saved successfully".to_string(),
        settings: req.settings,
    })))
}

/// POST /api/notifications/test
pub async fn send_test(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TestNotificationRequest>,
) -> Result<Json<ApiResponse<DispatchResponse>>, ApiError> {
    let only: Option<NotificationType> = parse_opt(req.notification_type.as_deref())?;
    let settings = match req.settings {
        Some(settings) => settings,
        None => state.settings_store.get_settings().await,
    };
    let contacts = TestContacts {
        email: req.test_email,
        phone: req.test_phone,
    };

    let report = state
        .dispatcher
        .dispatch_test(req.tab, only, &settings, &contacts)
        .await;
    dispatch_response(report, "Test notifications sent successfully")
}

/// POST /api/notifications/send
pub async fn send(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SendNotificationRequest>,
) -> Result<Json<ApiResponse<DispatchResponse>>, ApiError> {
    let ty: NotificationType = req.notification_type.parse()?;
    let report = state.dispatcher.dispatch(ty, &req.data).await;
    dispatch_response(report, "Notifications sent successfully")
}

/// GET /api/notifications/history
pub async fn history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<ApiResponse<HistoryResponse>>, ApiError> {
    let days = params
        .days
        .unwrap_or(state.config.notifications.default_history_days);
    if days < 0 {
        return Err(AppError::validation("days cannot be negative").into());
    }

    let query = HistoryQuery {
        notification_type: parse_opt(params.notification_type.as_deref())?,
        channel: parse_opt::<Channel>(params.channel.as_deref())?,
        event: parse_opt::<EventType>(params.event.as_deref())?,
        days,
    };
    let history = state.settings_store.get_history(&query).await;
    Ok(Json(ApiResponse::ok(HistoryResponse { history })))
}

/// GET /api/notifications/internal
pub async fn list_internal(
    State(state): State<AppState>,
    Query(params): Query<InboxParams>,
) -> Result<Json<ApiResponse<InboxResponse>>, ApiError> {
    let category: Option<AlertCategory> = parse_opt(params.category.as_deref())?;
    let priority: Option<AlertPriority> = parse_opt(params.priority.as_deref())?;
    let limit = params
        .limit
        .unwrap_or(state.config.notifications.internal.recent_limit);

    let inbox = &state.staff_inbox;
    let notifications = match (category, priority) {
        (Some(category), _) => inbox.by_category(category).await,
        (None, Some(priority)) => inbox.by_priority(priority).await,
        (None, None) => inbox.recent(limit).await,
    };
    let notifications: Vec<InternalNotification> = notifications
        .into_iter()
        .filter(|n| priority.is_none_or(|p| n.priority == p))
        .take(limit)
        .collect();

    Ok(Json(ApiResponse::ok(InboxResponse {
        notifications,
        unread_count: inbox.unread_count().await,
    })))
}

/// GET /api/notifications/internal/unread-count
pub async fn unread_count(State(state): State<AppState>) -> Json<ApiResponse<CountResponse>> {
    let count = state.staff_inbox.unread_count().await;
    Json(ApiResponse::ok(CountResponse { count }))
}

/// PUT /api/notifications/internal/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<InternalNotification>>, ApiError> {
    let notification = state
        .staff_inbox
        .mark_as_read(&id)
        .await
        .ok_or_else(|| AppError::not_found(format!("Notification '{id}' not found")))?;
    Ok(Json(ApiResponse::ok(notification)))
}
