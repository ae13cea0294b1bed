use carros_client::{CarrosBlockingClient, registry_error};
use carros_core::{
    registry::{
        api::{StoreRequest, StoreResponse},
        error::RegistryError,
        services::store::VehicleStore,
    },
    transport::loopback::spawn_loopback_registry,
};
use tonic::Code;
use tower::Service;

fn count(runtime: &tokio::runtime::Runtime, store: &VehicleStore) -> usize {
    match runtime.block_on(store.clone().call(StoreRequest::Count)).unwrap() {
        StoreResponse::Count(count) => count,
        other => panic!("Expected StoreResponse::Count, got {other:?}"),
    }
}

#[test]
fn blocking_register_outcomes() {
    let server_runtime = tokio::runtime::Runtime::new().unwrap();
    let store = VehicleStore::default();
    let loopback = server_runtime.block_on(spawn_loopback_registry(store.clone())).unwrap();

    let mut client = CarrosBlockingClient::connect(loopback.endpoint()).unwrap();

    let gol = client.register("Gol", "HPX-1234").unwrap();
    assert_eq!(gol.model, "Gol");
    assert_eq!(gol.plate, "HPX-1234");
    assert_eq!(
        server_runtime.block_on(store.clone().call(StoreRequest::ExistsById(gol.id))).unwrap(),
        StoreResponse::Exists(true)
    );

    let conflict = client.register("Palio", "HPX-1234").unwrap_err();
    assert_eq!(conflict.code(), Code::AlreadyExists);
    assert_eq!(conflict.message(), "vehicle with existing plate");
    assert_eq!(registry_error(conflict), RegistryError::PlateAlreadyExists);

    let invalid = client.register("", "").unwrap_err();
    assert_eq!(invalid.code(), Code::InvalidArgument);
    assert_eq!(invalid.message(), "invalid input data");

    assert_eq!(count(&server_runtime, &store), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_register_inside_runtime() {
    let store = VehicleStore::default();
    let loopback = spawn_loopback_registry(store.clone()).await.unwrap();

    let mut client = CarrosBlockingClient::connect(loopback.endpoint()).unwrap();
    let record = client.register("Gol", "OIP-9876").unwrap();
    assert_eq!(
        store.clone().call(StoreRequest::FindById(record.id)).await.unwrap(),
        StoreResponse::Record(Some(record))
    );
}

#[test]
fn blocking_connect_refused() {
    // Bind then release a port so nothing listens on it
    let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let status = CarrosBlockingClient::connect(format!("http://127.0.0.1:{port}")).unwrap_err();
    assert_eq!(status.code(), Code::Unavailable);
}
