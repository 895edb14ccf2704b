use sea_orm_migration::prelude::*;

use propelty_api_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
