//! Pins the JSON shape of store actions and snapshots.

use footer_proto::protocol::{
    ActionTag, Browse, MediaItem, Player, StoreAction, StoreSnapshot, Stream,
};
use serde_json::json;

#[test]
fn outbound_commands_match_wire_format() {
    let full_screen = StoreAction::ShowFullScreen { show: true };
    assert_eq!(
        serde_json::to_value(&full_screen).unwrap(),
        json!({ "type": "showFullScreen", "show": true })
    );

    let browse = StoreAction::SetCurrentBrowse {
        browse: Browse::ShowStreamMediaList,
    };
    assert_eq!(
        serde_json::to_value(&browse).unwrap(),
        json!({ "type": "setCurrentBrowse", "browse": "showStreamMediaList" })
    );
}

#[test]
fn payload_fields_are_camel_case() {
    let action = StoreAction::SetExternalPlayerList {
        external_player_list: vec![Player::new("kitchen", "mpd")],
    };
    assert_eq!(
        serde_json::to_value(&action).unwrap(),
        json!({
            "type": "setExternalPlayerList",
            "externalPlayerList": [{ "name": "kitchen", "kind": "mpd" }]
        })
    );

    let decoded: StoreAction = serde_json::from_value(json!({
        "type": "loadStreamAndPlay",
        "stream": { "name": "BBC", "webradio": true },
        "index": 3
    }))
    .unwrap();
    assert_eq!(
        decoded,
        StoreAction::LoadStreamAndPlay {
            stream: Stream::webradio("BBC"),
            index: 3
        }
    );
    assert_eq!(decoded.tag(), ActionTag::LoadStreamAndPlay);
}

#[test]
fn snapshot_decodes_original_shape() {
    let snap: StoreSnapshot = serde_json::from_value(json!({
        "lastAction": "setMediaNow",
        "streamList": [{ "name": "BBC", "webradio": true }],
        "profile": {
            "stream": { "name": "BBC", "webradio": true },
            "mediaNow": { "title": "Teardrop" },
            "mediaNext": false,
            "currentPlayer": null,
            "jukeboxIndex": 0
        }
    }))
    .unwrap();
    assert_eq!(snap.last_action, Some(ActionTag::SetMediaNow));
    assert_eq!(snap.stream_list.len(), 1);
    assert!(snap.profile.media_now.is_known());
    assert_eq!(snap.profile.media_next, MediaItem::Unknown);
    assert!(snap.external_player_list.is_empty());
}
