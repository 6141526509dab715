//! Order, reorder, refresh, and cancel: the operations that write the address cache.
//!
//! The cache is only touched after the provider answered `OK`, so a rejected request
//! never leaves a half-written record behind.

// self
use crate::{
	_prelude::*,
	api::{AddressPayload, EmptyPayload, Endpoint, FreshIdPayload},
	client::{
		Client,
		common::{self, require},
		options::{OrderOptions, ReorderOptions},
	},
	http::{ProviderHttpClient, TransportErrorMapper},
	obs::Operation,
};

impl<C, M> Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Orders a new address for `website` and caches its task id.
	///
	/// ```no_run
	/// # use kopeechka_store::{client::{OrderOptions, ReqwestStoreClient}, provider::DomainGroup};
	/// # async fn demo(client: ReqwestStoreClient) -> kopeechka_store::error::Result<()> {
	/// let email = client
	/// 	.order_email("example.com", OrderOptions::default().domain(DomainGroup::Gmx))
	/// 	.await?;
	/// # Ok(())
	/// # }
	/// ```
	pub async fn order_email(&self, website: &str, options: OrderOptions) -> Result<String> {
		const ENDPOINT: Endpoint = Endpoint::OrderEmail;

		common::observe(Operation::OrderEmail, async move {
			let mut params = vec![("site", website.to_owned())];

			options.append_to(&mut params);
			params.push(("soft", self.config.affiliate_id.clone()));

			let (_, payload) = self.call::<AddressPayload>(ENDPOINT, params).await?;
			let address = require(payload.mail, ENDPOINT, "mail")?;
			let task_id = require(payload.id, ENDPOINT, "id")?;

			self.cache.put(&address, &task_id, payload.password.as_deref());

			Ok(address)
		})
		.await
	}

	/// Reorders `address` for `website`, issuing a fresh task id and restarting its TTL.
	///
	/// Use this to receive another message on an address already held.
	pub async fn reorder_email(
		&self,
		website: &str,
		address: &str,
		options: ReorderOptions,
	) -> Result<()> {
		const ENDPOINT: Endpoint = Endpoint::ReorderEmail;

		common::observe(Operation::ReorderEmail, async move {
			let mut params = vec![("site", website.to_owned()), ("email", address.to_owned())];

			options.append_to(&mut params);

			let (_, payload) = self.call::<AddressPayload>(ENDPOINT, params).await?;
			let task_id = require(payload.id, ENDPOINT, "id")?;
			let address = payload.mail.as_deref().unwrap_or(address);

			self.cache.put(address, &task_id, payload.password.as_deref());

			Ok(())
		})
		.await
	}

	/// Re-synchronizes the cached task id of `address` without requesting new messages.
	pub async fn refresh_email_id(&self, website: &str, address: &str) -> Result<()> {
		const ENDPOINT: Endpoint = Endpoint::FreshId;

		common::observe(Operation::RefreshEmailId, async move {
			let params = vec![("site", website.to_owned()), ("email", address.to_owned())];
			let (_, payload) = self.call::<FreshIdPayload>(ENDPOINT, params).await?;
			let task_id = require(payload.id, ENDPOINT, "id")?;

			self.cache.put(address, &task_id, None);

			Ok(())
		})
		.await
	}

	/// Releases `address` and forgets it locally.
	///
	/// Fails without any request when the address is not cached.
	pub async fn cancel_email(&self, address: &str) -> Result<()> {
		common::observe(Operation::CancelEmail, async move {
			let task_id = self.cache.task_id(address)?;

			self.call::<EmptyPayload>(Endpoint::CancelEmail, vec![("id", task_id)]).await?;
			self.cache.evict(address);

			Ok(())
		})
		.await
	}
}
