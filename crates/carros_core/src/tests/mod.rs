
use fixtures::RegistryFixture;
use tonic::Code;
use tower::{Service, service_fn};

use crate::{
    registry::{
        api::{StoreRequest, StoreResponse},
        error::RegistryError,
        init_registry, init_registry_with_store,
        services::store::VehicleStore,
    },
    transport::loopback::{spawn_loopback_registry, spawn_loopback_with_registry},
};

#[tokio::test]
async fn integration_init_registry() {
    crate::carros_tracing::init();
    let mut store = VehicleStore::default();
    let mut registry = init_registry(store.clone());

    let gol = register!(registry, "Gol", "HPX-1234");
    assert!(!gol.id.to_string().is_empty());
    assert_eq!(
        store.call(StoreRequest::FindById(gol.id)).await.unwrap(),
        StoreResponse::Record(Some(gol))
    );

    assert_rejected!(registry, "Palio", "HPX-1234", RegistryError::PlateAlreadyExists);
    assert_rejected!(registry, "", "", RegistryError::InvalidInput);
    assert_eq!(store.call(StoreRequest::Count).await.unwrap(), StoreResponse::Count(1));
}

#[tokio::test]
async fn integration_registry_blank_fields() {
    crate::carros_tracing::init();
    let mut store = VehicleStore::default();
    let mut registry = init_registry(store.clone());

    for (model, plate) in [("", "HPX-1234"), (" ", "HPX-1234"), ("Gol", ""), ("Gol", "\t "), ("", "")] {
        assert_rejected!(registry, model, plate, RegistryError::InvalidInput);
    }
    assert_eq!(store.call(StoreRequest::Count).await.unwrap(), StoreResponse::Count(0));
}

#[tokio::test]
async fn integration_registry_distinct_plates() {
    crate::carros_tracing::init();
    let mut store = VehicleStore::default();
    let mut registry = init_registry(store.clone());

    let gol = register!(registry, "Gol", "HPX-1234");
    let other_gol = register!(registry, "Gol", "HPX-1235");
    assert_ne!(gol.id, other_gol.id);
    assert_eq!(store.call(StoreRequest::Count).await.unwrap(), StoreResponse::Count(2));
}

#[tokio::test]
async fn integration_grpc_register_new_vehicle() {
    crate::carros_tracing::init();
    let fixture = RegistryFixture::new().await;
    let mut client = fixture.client();

    let response = grpc_register!(client, "Gol", "HPX-1234").unwrap().into_inner();

    assert!(!response.id.is_empty());
    assert_eq!(response.model, "Gol");
    assert_eq!(response.plate, "HPX-1234");
    assert!(fixture.exists_by_id(&response.id).await);
    assert_eq!(fixture.count().await, 1);
}

#[tokio::test]
async fn integration_grpc_register_existing_plate() {
    crate::carros_tracing::init();
    let fixture = RegistryFixture::new().await;
    let mut client = fixture.client();
    let existing = fixture.save("Palio", "OIP-9876").await;

    assert_status!(
        grpc_register!(client, "Gol", existing.plate),
        Code::AlreadyExists,
        "vehicle with existing plate"
    );
    assert_eq!(fixture.count().await, 1);
}

#[tokio::test]
async fn integration_grpc_register_invalid_input() {
    crate::carros_tracing::init();
    let fixture = RegistryFixture::new().await;
    let mut client = fixture.client();

    assert_status!(grpc_register!(client, "", ""), Code::InvalidArgument, "invalid input data");
    assert_eq!(fixture.count().await, 0);
}

#[tokio::test]
async fn integration_grpc_register_absent_fields() {
    crate::carros_tracing::init();
    let fixture = RegistryFixture::new().await;
    let mut client = fixture.client();

    // Unset proto3 strings arrive as empty strings
    let result = client
        .register(tonic::Request::new(crate::transport::grpc::proto::VehicleRequest {
            model: "Gol".to_string(),
            ..Default::default()
        }))
        .await;
    assert_status!(result, Code::InvalidArgument, "invalid input data");

    assert_status!(grpc_register!(client, "   ", "HPX-1234"), Code::InvalidArgument, "invalid input data");
    assert_eq!(fixture.count().await, 0);
}

#[tokio::test]
async fn integration_grpc_failures_are_repeatable() {
    crate::carros_tracing::init();
    let fixture = RegistryFixture::new().await;
    let mut client = fixture.client();
    fixture.save("Palio", "OIP-9876").await;

    for _ in 0..3 {
        assert_status!(grpc_register!(client, "", "HPX-1234"), Code::InvalidArgument, "invalid input data");
        assert_status!(
            grpc_register!(client, "Uno", "OIP-9876"),
            Code::AlreadyExists,
            "vehicle with existing plate"
        );
    }
    assert_eq!(fixture.count().await, 1);
}

#[tokio::test]
async fn integration_grpc_register_after_reset() {
    crate::carros_tracing::init();
    let fixture = RegistryFixture::new().await;
    let mut client = fixture.client();

    grpc_register!(client, "Gol", "HPX-1234").unwrap();
    fixture.delete_all().await;
    assert_eq!(fixture.count().await, 0);

    let response = grpc_register!(client, "Gol", "HPX-1234").unwrap().into_inner();
    assert!(fixture.exists_by_id(&response.id).await);
}

#[tokio::test]
async fn integration_grpc_concurrent_same_plate() {
    crate::carros_tracing::init();
    let fixture = RegistryFixture::new().await;

    let handles = (0..16)
        .map(|i| {
            let mut client = fixture.client();
            tokio::spawn(async move { grpc_register!(client, format!("model-{i}"), "RACE-0001") })
        })
        .collect::<Vec<_>>();

    let mut registered = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => registered += 1,
            Err(status) => {
                assert_eq!(status.code(), Code::AlreadyExists);
                assert_eq!(status.message(), "vehicle with existing plate");
            }
        }
    }
    assert_eq!(registered, 1);
    assert_eq!(fixture.count().await, 1);
}

#[tokio::test]
async fn integration_grpc_client_service() {
    crate::carros_tracing::init();
    let mut store = VehicleStore::default();
    let loopback = spawn_loopback_registry(store.clone()).await.unwrap();
    let mut remote = loopback.connect().await.unwrap();

    let gol = register!(remote, "Gol", "HPX-1234");
    assert_eq!(
        store.call(StoreRequest::ExistsById(gol.id)).await.unwrap(),
        StoreResponse::Exists(true)
    );
    assert_rejected!(remote, "Gol", "HPX-1234", RegistryError::PlateAlreadyExists);
    assert_rejected!(remote, "", "", RegistryError::InvalidInput);
}

#[tokio::test]
async fn integration_grpc_store_unavailable() {
    crate::carros_tracing::init();
    let failing_store = service_fn(|_: StoreRequest| async move {
        Err::<StoreResponse, _>(RegistryError::StoreUnavailable("connection refused".to_string()))
    });
    let loopback = spawn_loopback_with_registry(init_registry_with_store(failing_store)).await.unwrap();
    let mut client = crate::transport::grpc::proto::carros_client::CarrosClient::connect(loopback.endpoint())
        .await
        .unwrap();

    assert_status!(
        grpc_register!(client, "Gol", "HPX-1234"),
        Code::Internal,
        "Registry error, store unavailable (connection refused)"
    );
    // Validation still answers before the store is reached
    assert_status!(grpc_register!(client, "", ""), Code::InvalidArgument, "invalid input data");
}
