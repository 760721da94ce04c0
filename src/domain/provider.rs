use serde::{Deserialize, Deserializer, Serialize};

/// Catalog amounts may be missing or `null`; both mean zero.
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    InPerson,
    Online,
    Phone,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::InPerson, Channel::Online, Channel::Phone];

    /// Parses the selection keys the comparison form submits.
    pub fn from_selection_key(key: &str) -> Option<Channel> {
        match key.trim() {
            "in-person" | "inPerson" | "in_person" => Some(Channel::InPerson),
            "online" => Some(Channel::Online),
            "over-phone" | "phone" => Some(Channel::Phone),
            _ => None,
        }
    }

    pub fn selection_key(&self) -> &'static str {
        match self {
            Channel::InPerson => "in-person",
            Channel::Online => "online",
            Channel::Phone => "over-phone",
        }
    }
}

/// Fee terms for one acceptance channel. A missing rate means the provider
/// cannot take payments on that channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelFee {
    #[serde(default)]
    pub rate_pct: Option<f64>,
    #[serde(default, rename = "fixedGBP", deserialize_with = "null_as_zero")]
    pub fixed_gbp: f64,
}

impl ChannelFee {
    pub fn new(rate_pct: f64, fixed_gbp: f64) -> Self {
        Self {
            rate_pct: Some(rate_pct),
            fixed_gbp,
        }
    }

    pub fn unsupported() -> Self {
        Self {
            rate_pct: None,
            fixed_gbp: 0.0,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.rate_pct.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelFees {
    #[serde(default)]
    pub in_person: ChannelFee,
    #[serde(default)]
    pub online: ChannelFee,
    #[serde(default)]
    pub phone: ChannelFee,
}

impl ChannelFees {
    pub fn get(&self, channel: Channel) -> &ChannelFee {
        match channel {
            Channel::InPerson => &self.in_person,
            Channel::Online => &self.online,
            Channel::Phone => &self.phone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default, rename = "deviceCostGBP", deserialize_with = "null_as_zero")]
    pub device_cost_gbp: f64,
    #[serde(default, rename = "monthlyFeeGBP", deserialize_with = "null_as_zero")]
    pub monthly_fee_gbp: f64,
    pub transaction: ChannelFees,
    #[serde(default)]
    pub payout_days: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub create_account_url: Option<String>,
}

/// Payout time shown when the catalog leaves it out.
pub const DEFAULT_PAYOUT_DAYS: u32 = 1;

impl Provider {
    pub fn fee(&self, channel: Channel) -> &ChannelFee {
        self.transaction.get(channel)
    }

    pub fn payout_days_or_default(&self) -> u32 {
        self.payout_days.unwrap_or(DEFAULT_PAYOUT_DAYS)
    }

    /// A monthly fee implies the standard 12 month contract.
    pub fn contract_note(&self) -> &'static str {
        if self.monthly_fee_gbp > 0.0 {
            "*12 months contract"
        } else {
            "*No monthly contract"
        }
    }
}
