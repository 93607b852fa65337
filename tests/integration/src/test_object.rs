//! Object upload/download/listing integration tests.

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use selstack_model::StorageError;
    use selstack_model::input::{
        CreateContainerInput, GetObjectInput, ListObjectsInput, UploadObjectInput,
    };
    use selstack_model::types::{ConditionalHeaders, Metadata};

    use crate::{cleanup_container, storage_client, test_container_name};

    async fn create_container(client: &selstack_client::StorageClient, prefix: &str) -> String {
        let name = test_container_name(prefix);
        client
            .create_container(CreateContainerInput {
                container: name.clone(),
                ..Default::default()
            })
            .await
            .expect("create_container");
        name
    }

    #[tokio::test]
    #[ignore = "requires a live storage account"]
    async fn test_should_round_trip_object_bytes_and_metadata() {
        let client = storage_client();
        let container = create_container(&client, "roundtrip").await;

        let body = Bytes::from_static(b"the quick brown fox");
        let mut metadata = Metadata::new();
        metadata.insert("color".to_owned(), "red".to_owned());

        let uploaded = client
            .upload_object(UploadObjectInput {
                container: container.clone(),
                key: "notes/fox.txt".to_owned(),
                body: body.clone(),
                validate_checksum: true,
                content_type: Some("text/plain".to_owned()),
                metadata,
                ..Default::default()
            })
            .await
            .expect("upload_object");
        assert!(uploaded.etag.is_some());

        let fetched = client
            .get_object(GetObjectInput {
                container: container.clone(),
                key: "notes/fox.txt".to_owned(),
                ..Default::default()
            })
            .await
            .expect("get_object");
        assert_eq!(fetched.body, body);
        assert_eq!(fetched.content_type.as_deref(), Some("text/plain"));
        assert_eq!(
            fetched.metadata.get("color").map(String::as_str),
            Some("red")
        );

        cleanup_container(&client, &container).await;
    }

    #[tokio::test]
    #[ignore = "requires a live storage account"]
    async fn test_should_enumerate_every_object_exactly_once_when_paging() {
        let client = storage_client();
        let container = create_container(&client, "paging").await;

        for i in 0..7 {
            client
                .upload_object(UploadObjectInput {
                    container: container.clone(),
                    key: format!("item-{i:02}"),
                    body: Bytes::from_static(b"x"),
                    ..Default::default()
                })
                .await
                .expect("upload_object");
        }

        let all = client
            .list_all_objects(&container, 3)
            .await
            .expect("list_all_objects");
        tracing::info!(count = all.len(), "paged listing complete");
        let mut names: Vec<String> = all.into_iter().map(|o| o.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 7, "no duplicates, no omissions");

        cleanup_container(&client, &container).await;
    }

    #[tokio::test]
    #[ignore = "requires a live storage account"]
    async fn test_should_respect_listing_limit_and_marker() {
        let client = storage_client();
        let container = create_container(&client, "marker").await;

        for key in ["a", "b", "c"] {
            client
                .upload_object(UploadObjectInput {
                    container: container.clone(),
                    key: (*key).to_owned(),
                    body: Bytes::from_static(b"x"),
                    ..Default::default()
                })
                .await
                .expect("upload_object");
        }

        let page = client
            .list_objects(ListObjectsInput {
                container: container.clone(),
                limit: Some(2),
                marker: Some("a".to_owned()),
                ..Default::default()
            })
            .await
            .expect("list_objects");
        let names: Vec<&str> = page.entries.iter().map(|e| e.name()).collect();
        assert_eq!(names, ["b", "c"]);

        cleanup_container(&client, &container).await;
    }

    #[tokio::test]
    #[ignore = "requires a live storage account"]
    async fn test_should_honor_if_none_match_on_get() {
        let client = storage_client();
        let container = create_container(&client, "cond").await;

        let uploaded = client
            .upload_object(UploadObjectInput {
                container: container.clone(),
                key: "cached.txt".to_owned(),
                body: Bytes::from_static(b"payload"),
                ..Default::default()
            })
            .await
            .expect("upload_object");

        let err = client
            .get_object(GetObjectInput {
                container: container.clone(),
                key: "cached.txt".to_owned(),
                conditional: ConditionalHeaders {
                    if_none_match: uploaded.etag.clone(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.status().map(|s| s.as_u16()),
            Some(304),
            "matching etag should yield 304"
        );

        cleanup_container(&client, &container).await;
    }

    #[tokio::test]
    #[ignore = "requires a live storage account"]
    async fn test_should_delete_object() {
        let client = storage_client();
        let container = create_container(&client, "delete").await;

        client
            .upload_object(UploadObjectInput {
                container: container.clone(),
                key: "gone.txt".to_owned(),
                body: Bytes::from_static(b"x"),
                ..Default::default()
            })
            .await
            .expect("upload_object");
        client
            .delete_object(&container, "gone.txt")
            .await
            .expect("delete_object");

        let err = client
            .get_object(GetObjectInput {
                container: container.clone(),
                key: "gone.txt".to_owned(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        cleanup_container(&client, &container).await;
    }

    #[tokio::test]
    #[ignore = "requires a live storage account"]
    async fn test_should_fail_local_validation_without_touching_the_service() {
        let client = storage_client();
        let err = client
            .upload_object(UploadObjectInput {
                container: "c".to_owned(),
                key: String::new(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidArgument { .. }));
    }
}
