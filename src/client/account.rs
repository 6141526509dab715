//! Account-level reads: balance and domain listings.

// self
use crate::{
	_prelude::*,
	api::{BalancePayload, DomainsPayload, Endpoint, Zone, ZonesPayload},
	client::{
		Client,
		common::{self, require},
		options::{DomainsOptions, Params},
	},
	http::{ProviderHttpClient, TransportErrorMapper},
	obs::Operation,
};

impl<C, M> Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Returns the account balance in the configured currency.
	pub async fn get_balance(&self) -> Result<f64> {
		const ENDPOINT: Endpoint = Endpoint::Balance;

		common::observe(Operation::GetBalance, async move {
			let params = vec![("currency", self.config.currency.as_str().to_owned())];
			let (_, payload) = self.call::<BalancePayload>(ENDPOINT, params).await?;

			Ok(require(payload.balance, ENDPOINT, "balance")?)
		})
		.await
	}

	/// Lists domains usable for `website`.
	///
	/// With both sources enabled the two listings are fetched concurrently and concatenated,
	/// trusted domains first. Duplicates are kept.
	pub async fn get_domains(
		&self,
		website: Option<&str>,
		options: DomainsOptions,
	) -> Result<Vec<String>> {
		common::observe(Operation::GetDomains, async move {
			let trusted = async {
				if options.trusted {
					common::observe(
						Operation::FetchTrustedDomains,
						self.fetch_trusted_domains(website, &options),
					)
					.await
				} else {
					Ok(Vec::new())
				}
			};
			let kopeechka = async {
				if options.kopeechka {
					common::observe(
						Operation::FetchKopeechkaDomains,
						self.fetch_kopeechka_domains(website),
					)
					.await
				} else {
					Ok(Vec::new())
				}
			};
			let (mut domains, kopeechka) = tokio::try_join!(trusted, kopeechka)?;

			domains.extend(kopeechka);

			Ok(domains)
		})
		.await
	}

	async fn fetch_trusted_domains(
		&self,
		website: Option<&str>,
		options: &DomainsOptions,
	) -> Result<Vec<String>> {
		const ENDPOINT: Endpoint = Endpoint::Zones;

		let mut params = site_param(website);

		params.push(("popular", "1".into()));
		params.push(("currency", self.config.currency.as_str().to_owned()));

		let (_, payload) = self.call::<ZonesPayload>(ENDPOINT, params).await?;
		let zones = require(payload.popular, ENDPOINT, "popular")?;

		Ok(filter_zones(zones, options))
	}

	async fn fetch_kopeechka_domains(&self, website: Option<&str>) -> Result<Vec<String>> {
		const ENDPOINT: Endpoint = Endpoint::Domains;

		let (_, payload) = self.call::<DomainsPayload>(ENDPOINT, site_param(website)).await?;

		Ok(require(payload.domains, ENDPOINT, "domains")?)
	}
}

fn site_param(website: Option<&str>) -> Params {
	website.map(|site| ("site", site.to_owned())).into_iter().collect()
}

fn filter_zones(zones: Vec<Zone>, options: &DomainsOptions) -> Vec<String> {
	zones
		.into_iter()
		.filter(|zone| options.count.is_none_or(|bounds| bounds.admits(zone.count)))
		.filter(|zone| options.price.is_none_or(|bounds| bounds.admits(zone.cost)))
		.map(|zone| zone.name)
		.collect()
}
