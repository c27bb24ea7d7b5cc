use sdk::cosmwasm_ext::Response as CwResponse;

use crate::message::Response as MessageResponse;

pub fn empty_response() -> CwResponse {
    response_only_messages(MessageResponse::default())
}

pub fn response_only_messages<M>(messages: M) -> CwResponse
where
    M: Into<MessageResponse>,
{
    let MessageResponse { messages, events } = messages.into();

    let cw_resp: CwResponse = messages
        .into_iter()
        .fold(Default::default(), CwResponse::add_submessage);

    events.into_iter().fold(cw_resp, CwResponse::add_event)
}
