//! Integration tests for the scheduling-service client against a mock server.
//!
//! These verify the full request path: auth and tenant headers, payload
//! shape on the wire, error mapping, and that fetched schedules come back
//! adapted (derived fields populated).

use chrono::{Duration, Utc};
use fieldplan_core::api::CompleteTaskRequest;
use fieldplan_core::error::{ApiError, CoreError};
use fieldplan_core::plan::dto::SaveAsTemplate;
use fieldplan_core::plan::WorkTimeSlot;
use fieldplan_core::{
    Activity, Store, StoreActivity, TaskStatus, UserRef, WorkPlanFormData, WorkPlansClient,
};

fn valid_form() -> WorkPlanFormData {
    let store = Store::new("s1", "Via Roma").with_coordinates(45.4642, 9.1900);
    let activity = Activity::new("Restock shelves", 30);
    let assignment = StoreActivity::from_activity(store.clone(), activity);
    WorkPlanFormData::new()
        .with_name("Spring campaign")
        .with_deadline(Utc::now() + Duration::days(30))
        .with_stores(vec![store])
        .with_users(vec![UserRef::new("u1", "Ada")])
        .with_work_days(vec![1, 2, 3, 4, 5])
        .with_work_time_slots(vec![WorkTimeSlot::new("09:00", "18:00")])
        .with_store_activity(assignment)
}

const DETAIL_BODY: &str = r#"{
    "userId": "u1",
    "userName": "Ada",
    "planId": "p1",
    "planName": "Spring campaign",
    "summary": {"totalDays": 1, "totalTasks": 2},
    "dailySchedules": [{
        "id": "d1",
        "date": "2026-03-02",
        "dayOfWeek": 1,
        "startTime": "08:30",
        "endTime": "10:00",
        "totalWorkMinutes": 60,
        "totalTravelMinutes": 20,
        "totalTasks": 2,
        "workTasks": 1,
        "travelTasks": 1,
        "tasks": [
            {
                "id": "t1",
                "dailyScheduleId": "d1",
                "sequenceOrder": 1,
                "taskName": "Travel to Via Roma",
                "taskType": "TRAVEL",
                "status": "COMPLETED",
                "startTime": "08:30",
                "endTime": "08:50",
                "totalEstimatedMinutes": 20,
                "travelInfo": {
                    "fromStoreId": "s0",
                    "fromStoreName": "Depot",
                    "toStoreId": "s1",
                    "toStoreName": "Via Roma",
                    "distanceMeters": 4200.0,
                    "distanceKm": 4.2,
                    "segmentGeometry": {
                        "type": "LineString",
                        "coordinates": [[9.19, 45.46], [9.20, 45.47]]
                    }
                }
            },
            {
                "id": "t2",
                "dailyScheduleId": "d1",
                "sequenceOrder": 2,
                "taskName": "Restock shelves",
                "taskType": "WORK",
                "status": "IN_PROGRESS",
                "startTime": "09:00",
                "endTime": "10:00",
                "totalRepetitions": 2,
                "completedRepetitions": 1,
                "timePerRepetition": 30,
                "totalEstimatedMinutes": 60
            }
        ]
    }]
}"#;

#[tokio::test]
async fn test_user_schedule_detail_comes_back_adapted() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/work-plans/p1/user-schedules/u1")
        .match_header("authorization", "Bearer secret-token")
        .match_header("x-tenant", "acme")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(DETAIL_BODY)
        .create_async()
        .await;

    let client = WorkPlansClient::new(&server.url())
        .unwrap()
        .with_token("secret-token")
        .with_tenant("acme");
    let detail = client.user_schedule_detail("p1", "u1").await.unwrap();
    mock.assert_async().await;

    assert_eq!(detail.daily_schedules.len(), 1);
    let day = &detail.daily_schedules[0];

    let travel = &day.tasks[0];
    assert_eq!(travel.travel_minutes, 20);
    assert_eq!(travel.task_minutes, 0);
    assert_eq!(travel.task_number, 1);
    assert_eq!(travel.arrival_time.as_deref(), Some("08:30"));
    assert_eq!(travel.departure_time.as_deref(), Some("08:50"));
    // The nested geometry is re-serialized onto the flat field.
    let geometry: serde_json::Value =
        serde_json::from_str(travel.segment_geometry.as_deref().unwrap()).unwrap();
    assert_eq!(geometry["type"], "LineString");

    let work = &day.tasks[1];
    assert_eq!(work.task_minutes, 60);
    assert_eq!(work.travel_minutes, 0);
    assert_eq!(work.task_number, 2);
    assert_eq!(work.status, TaskStatus::InProgress);
}

#[tokio::test]
async fn test_non_2xx_maps_to_status_error_with_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/work-plans")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "plan not found"}"#)
        .create_async()
        .await;

    let client = WorkPlansClient::new(&server.url()).unwrap();
    let err = client.list_plans().await.unwrap_err();
    match err {
        CoreError::Api(ApiError::Status { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "plan not found");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_generate_sends_flattened_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/work-plans")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "name": "Spring campaign",
            "storeIds": ["s1"],
            "userIds": ["u1"],
            "saveAsTemplate": false
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "p9", "name": "Spring campaign"}"#)
        .create_async()
        .await;

    let client = WorkPlansClient::new(&server.url()).unwrap();
    let created = client
        .generate(&valid_form(), SaveAsTemplate::Skip)
        .await
        .unwrap();
    mock.assert_async().await;

    assert_eq!(created.id, "p9");
    assert_eq!(created.name, "Spring campaign");
}

#[tokio::test]
async fn test_generate_with_template_carries_template_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/work-plans")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "saveAsTemplate": true,
            "templateName": "Spring base"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "p10", "name": "Spring campaign"}"#)
        .create_async()
        .await;

    let client = WorkPlansClient::new(&server.url()).unwrap();
    let save = SaveAsTemplate::Save {
        name: "Spring base".into(),
        description: None,
    };
    client.generate(&valid_form(), save).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_task_status_sends_status_body_and_adapts_response() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/work-plans/p1/tasks/t2/status")
        .match_body(mockito::Matcher::Json(
            serde_json::json!({"status": "COMPLETED"}),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "id": "t2",
                "dailyScheduleId": "d1",
                "sequenceOrder": 2,
                "taskName": "Restock shelves",
                "taskType": "WORK",
                "status": "COMPLETED",
                "startTime": "09:00",
                "endTime": "10:00",
                "totalEstimatedMinutes": 60
            }"#,
        )
        .create_async()
        .await;

    let client = WorkPlansClient::new(&server.url()).unwrap();
    let task = client
        .update_task_status("p1", "t2", TaskStatus::Completed)
        .await
        .unwrap();
    mock.assert_async().await;

    assert_eq!(task.status, TaskStatus::Completed);
    assert_eq!(task.task_minutes, 60);
    assert_eq!(task.task_number, 2);
}

#[tokio::test]
async fn test_complete_task_posts_actual_duration() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/work-plans/p1/tasks/t2/complete")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "actualDuration": 50,
            "notes": "shelf layout changed"
        })))
        .with_status(204)
        .create_async()
        .await;

    let client = WorkPlansClient::new(&server.url()).unwrap();
    let completion = CompleteTaskRequest {
        actual_duration: 50,
        notes: Some("shelf layout changed".into()),
        photos: None,
    };
    client.complete_task("p1", "t2", &completion).await.unwrap();
    mock.assert_async().await;
}
