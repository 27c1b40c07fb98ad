//! Client teardown: the shared cleanup path for an explicit `QUIT`, a
//! reader EOF, and a send-queue overflow alike.
//!
//! All three are handled uniformly: set the client's sticky error,
//! then run this once to fan out `QUIT` to co-members, strip the
//! client out of every channel it was in, and release its nick.

use std::collections::HashMap;
use std::sync::Arc;

use chatty_proto::Message;

use crate::state::{Client, Service, UserId};

pub fn quit(service: &Service, client: &Arc<Client>, reason: &str) {
    let mut co_members: HashMap<UserId, Arc<Client>> = HashMap::new();
    let channel_names: Vec<String> = client.channels.iter().map(|e| e.clone()).collect();

    for name in &channel_names {
        if let Some(chan_lock) = service.get_channel(name) {
            let mut chan = chan_lock.write();
            for (id, member) in chan.members.iter() {
                if *id != client.id {
                    co_members.insert(*id, member.clone());
                }
            }
            chan.members.remove(&client.id);
            chan.modes.operators.remove(&client.id);
            chan.modes.voiced.remove(&client.id);
        }
        client.channels.remove(name);
        service.drop_if_empty(name);
    }

    let mut params = Vec::new();
    if !reason.is_empty() {
        params.push(reason.to_string());
    }
    let quit_msg = Message {
        prefix: Some(client.origin()),
        cmd: "QUIT".to_string(),
        target: None,
        params,
        no_spaces: false,
        force_trailing_colon: false,
    };
    for member in co_members.values() {
        member.send(quit_msg.clone());
    }

    service.nicks.unregister(&client.user.read());
}
