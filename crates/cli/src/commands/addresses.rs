//! Shipping address commands.

use platter_client::store::AddressBook;
use platter_core::{AddressId, NewAddress, ShippingAddress};

use super::{CliError, connect};

#[allow(clippy::print_stdout)]
fn print_address(address: &ShippingAddress) {
    let marker = if address.is_default { " (default)" } else { "" };
    println!(
        "{}  {}{}  {}, {}, {}, {}",
        address.id, address.alias, marker, address.street, address.city, address.province,
        address.zip_code
    );
}

/// List the user's addresses.
pub async fn list() -> Result<(), CliError> {
    let (client, session) = connect()?;
    let mut book = AddressBook::open(client, session);
    book.refresh().await?;
    for address in book.items() {
        print_address(address);
    }
    Ok(())
}

/// Create an address and show the reconciled list.
pub async fn add(
    alias: String,
    street: String,
    city: String,
    province: String,
    zip_code: String,
    is_default: bool,
) -> Result<(), CliError> {
    let (client, session) = connect()?;
    let mut book = AddressBook::open(client, session);
    book.refresh().await?;

    let payload = NewAddress {
        alias,
        street,
        city,
        province,
        zip_code,
        is_default,
    };
    if let Some(created) = book.create(&payload).await?.applied() {
        tracing::info!("Created address {} ({})", created.id, created.alias);
    }
    for address in book.items() {
        print_address(address);
    }
    Ok(())
}

/// Make one address the default and show the reconciled list.
pub async fn set_default(id: AddressId) -> Result<(), CliError> {
    let (client, session) = connect()?;
    let mut book = AddressBook::open(client, session);
    book.refresh().await?;

    book.set_default(id).await?;
    for address in book.items() {
        print_address(address);
    }
    Ok(())
}

/// Delete an address and show the reconciled list.
pub async fn delete(id: AddressId) -> Result<(), CliError> {
    let (client, session) = connect()?;
    let mut book = AddressBook::open(client, session);
    book.refresh().await?;

    book.mark_for_deletion(id);
    book.delete(id).await?;
    tracing::info!("Deleted address {id}");
    for address in book.items() {
        print_address(address);
    }
    Ok(())
}
