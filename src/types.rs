use solana_pubkey::Pubkey;

/// One confirmed transaction as delivered by the webhook provider.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEnvelope {
    /// Transaction signature (base58).
    pub signature: String,
    /// Top-level instructions in execution order.
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

/// A top-level program invocation.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    /// Invoked program (base58).
    pub program_id: String,
    /// Accounts passed to the program, in order (base58).
    #[serde(default)]
    pub accounts: Vec<String>,
    /// Instruction data (base58).
    #[serde(default)]
    pub data: String,
    /// CPIs emitted while executing this instruction.
    #[serde(default)]
    pub inner_instructions: Vec<InnerInstruction>,
}

/// A CPI emitted by exactly one parent [`Instruction`].
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InnerInstruction {
    pub program_id: String,
    #[serde(default)]
    pub accounts: Vec<String>,
    #[serde(default)]
    pub data: String,
}

/// Addresses the pipeline trusts, built once at start-up and passed to every delivery.
///
/// Both addresses are kept in base58 form as well, since the webhook payload
/// carries plain strings and the locator compares against them per instruction.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    trusted_program: Pubkey,
    event_authority: Pubkey,
    trusted_program_b58: String,
    event_authority_b58: String,
}

impl PipelineContext {
    pub fn new(trusted_program: Pubkey, event_authority: Pubkey) -> Self {
        Self {
            trusted_program,
            event_authority,
            trusted_program_b58: trusted_program.to_string(),
            event_authority_b58: event_authority.to_string(),
        }
    }

    pub fn trusted_program(&self) -> &Pubkey {
        &self.trusted_program
    }

    pub fn event_authority(&self) -> &Pubkey {
        &self.event_authority
    }

    pub fn trusted_program_str(&self) -> &str {
        &self.trusted_program_b58
    }

    pub fn event_authority_str(&self) -> &str {
        &self.event_authority_b58
    }
}
