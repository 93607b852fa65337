//! Container CRUD integration tests.

#[cfg(test)]
mod tests {
    use selstack_model::input::{CreateContainerInput, ListContainersInput, UploadObjectInput};
    use selstack_model::types::{ContainerType, CreateContainerStatus, Metadata};
    use selstack_model::StorageError;

    use crate::{cleanup_container, storage_client, test_container_name};

    #[tokio::test]
    #[ignore = "requires a live storage account"]
    async fn test_should_round_trip_container_type_and_metadata() {
        let client = storage_client();
        let name = test_container_name("meta");

        let mut metadata = Metadata::new();
        metadata.insert("team".to_owned(), "backend".to_owned());

        client
            .create_container(CreateContainerInput {
                container: name.clone(),
                container_type: ContainerType::Public,
                metadata: metadata.clone(),
                ..Default::default()
            })
            .await
            .expect("create_container");

        let info = client.container_info(&name).await.expect("container_info");
        assert_eq!(info.container_type, ContainerType::Public);
        assert_eq!(info.metadata.get("team"), metadata.get("team"));
        assert_eq!(info.object_count, 0);

        cleanup_container(&client, &name).await;
    }

    #[tokio::test]
    #[ignore = "requires a live storage account"]
    async fn test_should_report_already_exists_on_duplicate_create() {
        let client = storage_client();
        let name = test_container_name("dup");

        let first = client
            .create_container(CreateContainerInput {
                container: name.clone(),
                ..Default::default()
            })
            .await
            .expect("first create");
        assert_eq!(first.status, CreateContainerStatus::Created);

        let second = client
            .create_container(CreateContainerInput {
                container: name.clone(),
                ..Default::default()
            })
            .await
            .expect("second create");
        assert_eq!(second.status, CreateContainerStatus::AlreadyExists);

        cleanup_container(&client, &name).await;
    }

    #[tokio::test]
    #[ignore = "requires a live storage account"]
    async fn test_should_list_created_containers() {
        let client = storage_client();
        let name = test_container_name("list");

        client
            .create_container(CreateContainerInput {
                container: name.clone(),
                ..Default::default()
            })
            .await
            .expect("create_container");

        let listing = client
            .list_containers(ListContainersInput::default())
            .await
            .expect("list_containers");
        assert!(
            listing.entries.iter().any(|e| e.name == name),
            "listing should contain {name}"
        );

        cleanup_container(&client, &name).await;
    }

    #[tokio::test]
    #[ignore = "requires a live storage account"]
    async fn test_should_refuse_to_delete_non_empty_container() {
        let client = storage_client();
        let name = test_container_name("nonempty");

        client
            .create_container(CreateContainerInput {
                container: name.clone(),
                ..Default::default()
            })
            .await
            .expect("create_container");
        client
            .upload_object(UploadObjectInput {
                container: name.clone(),
                key: "blocker.txt".to_owned(),
                body: b"x".as_ref().into(),
                ..Default::default()
            })
            .await
            .expect("upload_object");

        let err = client.delete_container(&name).await.unwrap_err();
        assert!(
            matches!(err, StorageError::Service { .. }),
            "expected a service error, got {err}"
        );

        cleanup_container(&client, &name).await;
    }
}
