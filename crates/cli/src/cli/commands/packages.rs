//! Package command handlers.

use std::sync::Arc;

use anyhow::Result;
use memberdesk_domain::{
    CreatePackageRequest, PackageQuery, SwitchPackagesRequest, UpdatePackageRequest,
};
use memberdesk_infra::{ApiClient, PackageCommands};

use super::super::{PackageCommand, PackageFields};
use super::print_json;

pub async fn run(client: Arc<ApiClient>, command: PackageCommand) -> Result<()> {
    let packages = PackageCommands::new(client);

    match command {
        PackageCommand::List { filters } => {
            let query = PackageQuery {
                is_active: filters.active,
                search: filters.search,
                take: filters.take,
                skip: filters.skip,
                sort_by: filters.sort_by,
                order: filters.order,
            };
            print_json(&packages.list(&query).await?)
        }
        PackageCommand::Active => print_json(&packages.active().await?),
        PackageCommand::Create { fields } => {
            print_json(&packages.create(&create_request(fields)).await?)
        }
        PackageCommand::Update { id, fields, active, position } => {
            let payload =
                UpdatePackageRequest { fields: create_request(fields), is_active: active, position };
            print_json(&packages.update(&id, &payload).await?)
        }
        PackageCommand::Deactivate { id } => Ok(packages.deactivate(&id).await?),
        PackageCommand::Recommend { id } => Ok(packages.recommend(&id).await?),
        PackageCommand::Switch { first, second } => {
            let payload = SwitchPackagesRequest { first_package_id: first, second_package_id: second };
            Ok(packages.switch_positions(&payload).await?)
        }
        PackageCommand::Delete { id } => Ok(packages.delete(&id).await?),
    }
}

fn create_request(fields: PackageFields) -> CreatePackageRequest {
    CreatePackageRequest {
        name: fields.name,
        price: fields.price,
        discount: fields.discount,
        giveaway_entries: fields.entries,
        summary: fields.summary,
    }
}
