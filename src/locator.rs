use crate::types::{InnerInstruction, Instruction, PipelineContext, TransactionEnvelope};

/// Returns the single self-CPI event carrier of `ix`, if there is exactly one.
///
/// A carrier is an inner instruction issued by the trusted program whose only
/// account is the event authority. Top-level instructions from other programs,
/// or with zero or several carriers, yield `None`.
pub fn qualifying_inner<'a>(
    ctx: &PipelineContext,
    ix: &'a Instruction,
) -> Option<&'a InnerInstruction> {
    if ix.program_id != ctx.trusted_program_str() {
        return None;
    }

    let mut carriers = ix
        .inner_instructions
        .iter()
        .filter(|inner| is_event_carrier(ctx, inner));
    let first = carriers.next()?;
    if carriers.next().is_some() {
        return None;
    }
    Some(first)
}

fn is_event_carrier(ctx: &PipelineContext, inner: &InnerInstruction) -> bool {
    inner.program_id == ctx.trusted_program_str()
        && matches!(inner.accounts.as_slice(), [only] if only == ctx.event_authority_str())
}

/// Base58 event payloads carried by `tx`, one per accepted instruction, in order.
pub fn matched_event_payloads<'a>(
    ctx: &'a PipelineContext,
    tx: &'a TransactionEnvelope,
) -> impl Iterator<Item = &'a str> + 'a {
    tx.instructions
        .iter()
        .filter_map(move |ix| qualifying_inner(ctx, ix))
        .map(|inner| inner.data.as_str())
}
