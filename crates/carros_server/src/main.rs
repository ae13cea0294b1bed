use std::net::SocketAddr;

use carros_core::{
    registry::{init_registry, services::store::VehicleStore},
    transport::grpc::{
        CarrosHandler, DEFAULT_GRPC_PORT,
        proto::{CARROS_DESCRIPTOR_SET, carros_server::CarrosServer},
    },
};
use clap::Parser;
use tonic::transport::Server;
use tonic_reflection::server::Builder;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "carros_server")]
#[command(about = "Vehicle registration gRPC server")]
struct CarrosServerArgs {
    /// Server address to bind to
    #[arg(short, long, default_value = "[::1]")]
    address: String,

    /// Server port to bind to
    #[arg(short, long, default_value_t = DEFAULT_GRPC_PORT)]
    port: u16,

    /// Enable gRPC reflection
    #[arg(short, long, default_value_t = false)]
    reflection: bool,
}

impl CarrosServerArgs {
    fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.address, self.port).parse()
    }
}

#[cfg(not(tarpaulin_include))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    carros_core::carros_tracing::init_for_server();

    let args = CarrosServerArgs::parse();
    let address = args.socket_addr()?;

    let registry = init_registry(VehicleStore::default());
    let mut server_builder =
        Server::builder().add_service(CarrosServer::new(CarrosHandler::new(registry)));

    if args.reflection {
        let reflection_service = Builder::configure()
            .register_encoded_file_descriptor_set(CARROS_DESCRIPTOR_SET)
            .build_v1()?;
        server_builder = server_builder.add_service(reflection_service);
    }

    info!(%address, reflection = args.reflection, "carros server listening");
    server_builder
        .serve_with_shutdown(address, async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}
