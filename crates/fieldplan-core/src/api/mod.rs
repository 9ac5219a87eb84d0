//! Async REST client for the external scheduling service.
//!
//! The route optimizer itself runs server-side; this client only submits
//! the authored plan and reads back the generated itineraries. Every
//! per-worker schedule fetched here passes through the response adapter
//! before it is handed to callers, so the raw backend task shape never
//! escapes this module. Requests are not retried and responses are not
//! cached; a failure surfaces as an error for the caller to report.

use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{ApiError, Result};
use crate::itinerary::{
    adapt_user_schedule_detail, adapt_work_task, TaskStatus, UserScheduleDetail, WorkPlanStatus,
    WorkTask,
};
use crate::plan::dto::{generate_request, preview_request, SaveAsTemplate};
use crate::plan::{WorkPlanFormData, WorkPlanTemplate, WorkPlanTemplateSummary};

/// Preview output of the scheduling engine. The per-worker assignments and
/// clusters are consumed opaquely; only the warnings are inspected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPreview {
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// Identity of a freshly generated plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPlan {
    pub id: String,
    pub name: String,
}

/// Listing row for `GET /work-plans`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPlanListItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: WorkPlanStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
}

/// Listing row for `GET /work-plans/{planId}/user-schedules`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserScheduleListItem {
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub total_days: u32,
    #[serde(default)]
    pub total_tasks: u32,
    #[serde(default)]
    pub progress_percent: u32,
}

/// Payload for `PATCH .../tasks/{taskId}/complete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTaskRequest {
    /// Actual minutes spent on site.
    pub actual_duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
}

#[derive(Serialize)]
struct StatusBody<S: Serialize> {
    status: S,
}

/// Client for the work-plans REST surface.
pub struct WorkPlansClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
    tenant: Option<String>,
}

impl WorkPlansClient {
    /// Build a client against a base URL such as
    /// `https://scheduler.example.com/api`.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut base_url: Url = base_url.parse()?;
        // Joins are relative to the last path segment; a trailing slash
        // keeps the base path intact.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        Ok(Self {
            http: Client::new(),
            base_url,
            token: None,
            tenant: None,
        })
    }

    /// Attach the opaque bearer token from the keyring.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Attach the tenant identifier sent as the `X-Tenant` header.
    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /work-plans/preview`
    pub async fn preview(
        &self,
        form: &WorkPlanFormData,
        simulated_workers: Option<u32>,
    ) -> Result<PlanPreview> {
        let payload = preview_request(form, simulated_workers)?;
        debug!(simulated_workers, "requesting plan preview");
        let resp = self
            .request(Method::POST, "work-plans/preview")?
            .json(&payload)
            .send()
            .await
            .map_err(ApiError::from)?;
        let resp = check(resp).await?;
        Ok(resp.json().await.map_err(ApiError::from)?)
    }

    /// `POST /work-plans`
    pub async fn generate(
        &self,
        form: &WorkPlanFormData,
        save_as_template: SaveAsTemplate,
    ) -> Result<CreatedPlan> {
        let payload = generate_request(form, save_as_template)?;
        debug!(plan_name = %form.name, "submitting work plan");
        let resp = self
            .request(Method::POST, "work-plans")?
            .json(&payload)
            .send()
            .await
            .map_err(ApiError::from)?;
        let resp = check(resp).await?;
        Ok(resp.json().await.map_err(ApiError::from)?)
    }

    /// `GET /work-plans`
    pub async fn list_plans(&self) -> Result<Vec<WorkPlanListItem>> {
        let resp = self
            .request(Method::GET, "work-plans")?
            .send()
            .await
            .map_err(ApiError::from)?;
        let resp = check(resp).await?;
        Ok(resp.json().await.map_err(ApiError::from)?)
    }

    /// `GET /work-plans/{planId}/user-schedules`
    pub async fn list_user_schedules(&self, plan_id: &str) -> Result<Vec<UserScheduleListItem>> {
        let path = format!("work-plans/{}/user-schedules", urlencoding::encode(plan_id));
        let resp = self
            .request(Method::GET, &path)?
            .send()
            .await
            .map_err(ApiError::from)?;
        let resp = check(resp).await?;
        Ok(resp.json().await.map_err(ApiError::from)?)
    }

    /// `GET /work-plans/{planId}/user-schedules/{userId}`, adapted.
    pub async fn user_schedule_detail(
        &self,
        plan_id: &str,
        user_id: &str,
    ) -> Result<UserScheduleDetail> {
        let path = format!(
            "work-plans/{}/user-schedules/{}",
            urlencoding::encode(plan_id),
            urlencoding::encode(user_id)
        );
        debug!(plan_id, user_id, "fetching user schedule detail");
        let resp = self
            .request(Method::GET, &path)?
            .send()
            .await
            .map_err(ApiError::from)?;
        let resp = check(resp).await?;
        let detail: UserScheduleDetail = resp.json().await.map_err(ApiError::from)?;
        Ok(adapt_user_schedule_detail(detail))
    }

    /// `PATCH /work-plans/{planId}/tasks/{taskId}/status`, response adapted.
    pub async fn update_task_status(
        &self,
        plan_id: &str,
        task_id: &str,
        status: TaskStatus,
    ) -> Result<WorkTask> {
        let path = format!(
            "work-plans/{}/tasks/{}/status",
            urlencoding::encode(plan_id),
            urlencoding::encode(task_id)
        );
        debug!(plan_id, task_id, ?status, "updating task status");
        let resp = self
            .request(Method::PATCH, &path)?
            .json(&StatusBody { status })
            .send()
            .await
            .map_err(ApiError::from)?;
        let resp = check(resp).await?;
        let task: WorkTask = resp.json().await.map_err(ApiError::from)?;
        Ok(adapt_work_task(task))
    }

    /// `PATCH /work-plans/{planId}/tasks/{taskId}/complete`
    pub async fn complete_task(
        &self,
        plan_id: &str,
        task_id: &str,
        completion: &CompleteTaskRequest,
    ) -> Result<()> {
        let path = format!(
            "work-plans/{}/tasks/{}/complete",
            urlencoding::encode(plan_id),
            urlencoding::encode(task_id)
        );
        debug!(plan_id, task_id, "completing task");
        let resp = self
            .request(Method::PATCH, &path)?
            .json(completion)
            .send()
            .await
            .map_err(ApiError::from)?;
        check(resp).await?;
        Ok(())
    }

    /// `PATCH /work-plans/{planId}/status`
    pub async fn update_plan_status(&self, plan_id: &str, status: WorkPlanStatus) -> Result<()> {
        let path = format!("work-plans/{}/status", urlencoding::encode(plan_id));
        debug!(plan_id, ?status, "updating plan status");
        let resp = self
            .request(Method::PATCH, &path)?
            .json(&StatusBody { status })
            .send()
            .await
            .map_err(ApiError::from)?;
        check(resp).await?;
        Ok(())
    }

    /// `GET /work-plan-templates`
    pub async fn list_templates(&self) -> Result<Vec<WorkPlanTemplateSummary>> {
        let resp = self
            .request(Method::GET, "work-plan-templates")?
            .send()
            .await
            .map_err(ApiError::from)?;
        let resp = check(resp).await?;
        Ok(resp.json().await.map_err(ApiError::from)?)
    }

    /// `GET /work-plan-templates/{id}`
    pub async fn get_template(&self, template_id: &str) -> Result<WorkPlanTemplate> {
        let path = format!("work-plan-templates/{}", urlencoding::encode(template_id));
        let resp = self
            .request(Method::GET, &path)?
            .send()
            .await
            .map_err(ApiError::from)?;
        let resp = check(resp).await?;
        Ok(resp.json().await.map_err(ApiError::from)?)
    }

    fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder, ApiError> {
        let url = self.base_url.join(path)?;
        let mut req = self.http.request(method, url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(tenant) = &self.tenant {
            req = req.header("X-Tenant", tenant);
        }
        Ok(req)
    }
}

/// Map non-2xx responses onto [`ApiError::Status`], pulling the message out
/// of a JSON `{"message": ...}` body when the backend sends one.
async fn check(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = extract_message(&body).unwrap_or(body);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_a_trailing_slash() {
        let client = WorkPlansClient::new("http://localhost:8080/api").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/");
        // The API prefix survives joining.
        let url = client.base_url().join("work-plans").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/work-plans");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(WorkPlansClient::new("not a url").is_err());
    }

    #[test]
    fn extract_message_prefers_json_message_field() {
        assert_eq!(
            extract_message(r#"{"message":"plan not found"}"#).as_deref(),
            Some("plan not found")
        );
        assert_eq!(extract_message("gateway timeout"), None);
        assert_eq!(extract_message(r#"{"error":"nope"}"#), None);
    }

    #[test]
    fn plan_preview_keeps_opaque_details() {
        let raw = r#"{
            "warnings": ["worker u2 overloaded"],
            "assignments": [{"userId": "u1", "days": 4}],
            "clusters": 3
        }"#;
        let preview: PlanPreview = serde_json::from_str(raw).unwrap();
        assert_eq!(preview.warnings, vec!["worker u2 overloaded"]);
        assert_eq!(preview.details["clusters"], 3);
        assert!(preview.details["assignments"].is_array());
    }

    #[test]
    fn status_body_shape() {
        let body = serde_json::to_value(StatusBody {
            status: TaskStatus::InProgress,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"status": "IN_PROGRESS"}));
    }
}
