#![forbid(unsafe_code)]

use lazy_static::lazy_static;
use log::info;
use poem::{listener::TcpListener, Route};
use poem_openapi::OpenApiService;

// Greet Utilities
use crate::v1::greeting::GreetingApi;
use crate::utils::config::{init_log, init_runtime_context, RuntimeCtx, GREET_ARGS, GREET_DIRS};
use crate::utils::errors::Errors;

// Modules
mod utils;
mod v1;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "GreetServer"; // for poem logging

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Lazily initialize the parameters variable so that is has a 'static lifetime.
// We exit if we can't read our parameters.
lazy_static! {
    static ref RUNTIME_CTX: RuntimeCtx = init_runtime_context();
}

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // --------------- Initialize Server --------------
    // Announce ourselves.
    println!("Starting greet_server!");

    // Initialize the server.
    greet_init();

    // --------------- Main Loop Set Up ---------------
    // Assign base URL.
    let greet_url = format!("{}:{}",
        RUNTIME_CTX.parms.config.http_addr,
        RUNTIME_CTX.parms.config.http_port);

    // The greeting endpoint is the only application endpoint.
    let api_service =
        OpenApiService::new(GreetingApi, "Greeting Server", "0.1.0").server(greet_url);

    // Allow the generated openapi specs to be retrieved from the server.
    let spec = api_service.spec_endpoint();
    let spec_yaml = api_service.spec_endpoint_yaml();

    // Create the routes and run the server.
    let addr = format!("{}{}", "0.0.0.0:", RUNTIME_CTX.parms.config.http_port);
    let ui = api_service.swagger_ui();
    let app = Route::new()
        .nest("/docs", ui)
        .at("/spec", spec)
        .at("/spec_yaml", spec_yaml)
        .nest("/", api_service);

    // ------------------ Main Loop -------------------
    poem::Server::new(TcpListener::bind(addr))
        .name(SERVER_NAME)
        .run(app)
        .await
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// greet_init:
// ---------------------------------------------------------------------------
/** Initialize all subsystems and data structures other than those needed
 * to configure the main loop processor.
 */
fn greet_init() {
    // Creating the data directories is a side effect of referencing them.
    let dirs = &*GREET_DIRS;
    if GREET_ARGS.create_dirs_only {
        println!("Data directories created under {}. Exiting.", dirs.root_dir);
        std::process::exit(0);
    }

    // Configure our log.
    init_log();

    // Force the reading of input parameters and initialization of runtime context.
    info!("{}", Errors::InputParms(format!("{:#?}", *RUNTIME_CTX)));

    // Log build info.
    print_version_info();
}

// ---------------------------------------------------------------------------
// print_version_info:
// ---------------------------------------------------------------------------
fn print_version_info() {
    // Log build info.
    info!("{}.", format!("\n*** Running GREET={}, BRANCH={}, COMMIT={}, DIRTY={}, SRC_TS={}, RUSTC={}",
                        option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"),
                        option_env!("GIT_BRANCH").unwrap_or("unknown"),
                        option_env!("GIT_COMMIT_SHORT").unwrap_or("unknown"),
                        option_env!("GIT_DIRTY").unwrap_or("unknown"),
                        option_env!("SOURCE_TIMESTAMP").unwrap_or("unknown"),
                        option_env!("RUSTC_VERSION").unwrap_or("unknown")),
    );
}
