//! HTTP-level tests for the API client against a mock server
//!
//! Covers the mutation endpoints and the error payload shapes the server
//! produces: `detail` strings, `error` strings, and per-field message
//! lists.

use profile_manager::api::ApiClient;
use profile_manager::config::ApiConfig;
use profile_manager::error::ApiError;
use profile_manager::models::ProfileFormData;
use profile_manager::upload::AvatarFile;

fn profile_body(id: i64, name: &str, email: &str, avatar: Option<&str>) -> String {
	let (filename, url) = match avatar {
		Some(name) => (
			format!(r#""{}""#, name),
			format!(r#""/media/avatars/{}""#, name),
		),
		None => ("null".to_string(), "null".to_string()),
	};
	format!(
		r#"{{"id":{},"name":"{}","email":"{}","bio":null,"avatar_filename":{},"avatar_url":{},"created_at":"2025-01-15T10:30:00Z","updated_at":"2025-02-01T08:00:00Z"}}"#,
		id, name, email, filename, url
	)
}

fn client_for(server: &mockito::Server) -> ApiClient {
	ApiClient::new(ApiConfig::new(server.url())).unwrap()
}

#[tokio::test]
async fn test_create_posts_form_data() {
	let mut server = mockito::Server::new_async().await;

	// Mock: POST /profiles/ (create, bio omitted when unset)
	let _m_create = server
		.mock("POST", "/profiles/")
		.match_header("content-type", "application/json")
		.match_body(mockito::Matcher::Json(serde_json::json!({
			"name": "Ada",
			"email": "ada@example.com",
		})))
		.with_status(201)
		.with_header("content-type", "application/json")
		.with_body(profile_body(1, "Ada", "ada@example.com", None))
		.expect(1)
		.create_async()
		.await;

	let client = client_for(&server);
	let data = ProfileFormData::new("Ada", "ada@example.com");

	let profile = client.create_profile(&data).await.unwrap();
	assert_eq!(profile.id, 1);
	assert_eq!(profile.name, "Ada");
	assert!(!profile.has_avatar());
}

#[tokio::test]
async fn test_create_sends_bio_when_set() {
	let mut server = mockito::Server::new_async().await;

	let _m_create = server
		.mock("POST", "/profiles/")
		.match_body(mockito::Matcher::Json(serde_json::json!({
			"name": "Grace",
			"email": "grace@example.com",
			"bio": "Compiler pioneer",
		})))
		.with_status(201)
		.with_header("content-type", "application/json")
		.with_body(profile_body(2, "Grace", "grace@example.com", None))
		.expect(1)
		.create_async()
		.await;

	let client = client_for(&server);
	let data = ProfileFormData::new("Grace", "grace@example.com").with_bio("Compiler pioneer");

	let profile = client.create_profile(&data).await.unwrap();
	assert_eq!(profile.id, 2);
}

#[tokio::test]
async fn test_update_puts_to_profile_path() {
	let mut server = mockito::Server::new_async().await;

	// Mock: PUT /profiles/7/ (full replace)
	let _m_update = server
		.mock("PUT", "/profiles/7/")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(profile_body(7, "Ada Lovelace", "ada@example.com", None))
		.expect(1)
		.create_async()
		.await;

	let client = client_for(&server);
	let data = ProfileFormData::new("Ada Lovelace", "ada@example.com");

	let profile = client.update_profile(7, &data).await.unwrap();
	assert_eq!(profile.name, "Ada Lovelace");
}

#[tokio::test]
async fn test_duplicate_email_maps_to_field_error() {
	let mut server = mockito::Server::new_async().await;

	// Mock: POST /profiles/ (serializer rejects the duplicate email)
	let _m_create = server
		.mock("POST", "/profiles/")
		.with_status(400)
		.with_header("content-type", "application/json")
		.with_body(r#"{"email":["profile with this email already exists."]}"#)
		.expect(1)
		.create_async()
		.await;

	let client = client_for(&server);
	let data = ProfileFormData::new("Ada", "ada@example.com");

	let err = client.create_profile(&data).await.unwrap_err();
	assert_eq!(
		err,
		ApiError::Validation {
			field: Some("email".to_string()),
			message: "profile with this email already exists.".to_string(),
		}
	);
}

#[tokio::test]
async fn test_delete_returns_unit_on_no_content() {
	let mut server = mockito::Server::new_async().await;

	// Mock: DELETE /profiles/7/ (no response body)
	let _m_delete = server
		.mock("DELETE", "/profiles/7/")
		.with_status(204)
		.expect(1)
		.create_async()
		.await;

	let client = client_for(&server);
	client.delete_profile(7).await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_profile_is_not_found() {
	let mut server = mockito::Server::new_async().await;

	let _m_delete = server
		.mock("DELETE", "/profiles/99/")
		.with_status(404)
		.with_header("content-type", "application/json")
		.with_body(r#"{"detail":"No Profile matches the given query."}"#)
		.create_async()
		.await;

	let client = client_for(&server);

	let err = client.delete_profile(99).await.unwrap_err();
	assert_eq!(
		err,
		ApiError::NotFound("No Profile matches the given query.".to_string())
	);
}

#[tokio::test]
async fn test_upload_avatar_sends_multipart() {
	let mut server = mockito::Server::new_async().await;

	// Mock: POST /profiles/7/upload_avatar/ (multipart form)
	let _m_upload = server
		.mock("POST", "/profiles/7/upload_avatar/")
		.match_header(
			"content-type",
			mockito::Matcher::Regex("multipart/form-data.*".to_string()),
		)
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(format!(
			r#"{{"success":true,"message":"Avatar uploaded successfully","profile":{},"avatar_url":"/media/avatars/7_portrait.png"}}"#,
			profile_body(7, "Ada", "ada@example.com", Some("7_portrait.png"))
		))
		.expect(1)
		.create_async()
		.await;

	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("portrait.png");
	std::fs::write(&path, [0u8; 512]).unwrap();
	let file = AvatarFile::from_path(&path).await.unwrap();

	let client = client_for(&server);

	let response = client.upload_avatar(7, &file).await.unwrap();
	assert!(response.success);
	assert_eq!(response.message, "Avatar uploaded successfully");
	assert!(response.profile.has_avatar());
	assert_eq!(response.avatar_url, "/media/avatars/7_portrait.png");
}

#[tokio::test]
async fn test_upload_error_payload_maps_to_validation() {
	let mut server = mockito::Server::new_async().await;

	// Mock: POST /profiles/7/upload_avatar/ (server-side rejection)
	let _m_upload = server
		.mock("POST", "/profiles/7/upload_avatar/")
		.with_status(400)
		.with_header("content-type", "application/json")
		.with_body(r#"{"error":"File size must be less than 5MB"}"#)
		.create_async()
		.await;

	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("huge.png");
	std::fs::write(&path, [0u8; 64]).unwrap();
	let file = AvatarFile::from_path(&path).await.unwrap();

	let client = client_for(&server);

	let err = client.upload_avatar(7, &file).await.unwrap_err();
	assert_eq!(
		err,
		ApiError::Validation {
			field: None,
			message: "File size must be less than 5MB".to_string(),
		}
	);
}

#[tokio::test]
async fn test_delete_avatar_roundtrip() {
	let mut server = mockito::Server::new_async().await;

	// Mock: DELETE /profiles/7/delete_avatar/
	let _m_remove = server
		.mock("DELETE", "/profiles/7/delete_avatar/")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(r#"{"success":true,"message":"Avatar deleted successfully"}"#)
		.expect(1)
		.create_async()
		.await;

	let client = client_for(&server);

	let response = client.delete_avatar(7).await.unwrap();
	assert!(response.success);
	assert_eq!(response.message, "Avatar deleted successfully");
}

#[tokio::test]
async fn test_list_is_idempotent_without_mutations() {
	let mut server = mockito::Server::new_async().await;

	let _m_list = server
		.mock("GET", "/profiles/")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(format!(
			"[{},{}]",
			profile_body(1, "Ada", "ada@example.com", None),
			profile_body(2, "Grace", "grace@example.com", Some("2.png"))
		))
		.expect(2)
		.create_async()
		.await;

	let client = client_for(&server);

	let first = client.list_profiles().await.unwrap();
	let second = client.list_profiles().await.unwrap();
	assert_eq!(first, second);
	assert_eq!(first.len(), 2);
}

#[tokio::test]
async fn test_server_error_is_unexpected() {
	let mut server = mockito::Server::new_async().await;

	let _m_list = server
		.mock("GET", "/profiles/")
		.with_status(500)
		.with_body("Internal Server Error")
		.create_async()
		.await;

	let client = client_for(&server);

	let err = client.list_profiles().await.unwrap_err();
	match err {
		ApiError::Unexpected { status, message } => {
			assert_eq!(status, 500);
			assert_eq!(message, "Internal Server Error");
		}
		other => panic!("expected Unexpected, got {:?}", other),
	}
}
