//! In-memory stand-in for the chat platform.
//!
//! Tracks rooms, forums, listings, messages, tags and voice presence in
//! one mutex-guarded state blob, with per-call failure injection so tests
//! can exercise the compensation paths.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use lfg_backend::platform::{
    AnchorContent, ChatPlatform, ForumTag, PlatformError, PlatformResult, RoomAcl, RoomInfo,
};

#[derive(Debug, Clone)]
struct Room {
    name: String,
    user_limit: u32,
    members: Vec<i64>,
}

#[derive(Debug, Clone)]
struct Listing {
    forum_id: i64,
    title: String,
    body: String,
    tags: Vec<i64>,
    messages: HashSet<i64>,
}

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    rooms: HashMap<i64, Room>,
    forums: HashMap<i64, String>,
    forum_tags: HashMap<i64, Vec<ForumTag>>,
    listings: HashMap<i64, Listing>,
    member_rooms: HashMap<i64, i64>,
    member_roles: HashMap<i64, Vec<i64>>,
    roles: HashSet<i64>,
    acl_log: Vec<(i64, RoomAcl)>,

    fail_create_listing: bool,
    fail_post_anchor: bool,
    fail_apply_acl: bool,
}

#[derive(Default)]
pub struct FakePlatform {
    state: Mutex<State>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(state: &mut State) -> i64 {
        state.next_id += 1000;
        state.next_id
    }

    // Failure injection

    pub fn fail_create_listing(&self, fail: bool) {
        self.state.lock().unwrap().fail_create_listing = fail;
    }

    pub fn fail_post_anchor(&self, fail: bool) {
        self.state.lock().unwrap().fail_post_anchor = fail;
    }

    pub fn fail_apply_acl(&self, fail: bool) {
        self.state.lock().unwrap().fail_apply_acl = fail;
    }

    // Out-of-band manipulation, as if a moderator deleted things by hand.

    pub fn vanish_room(&self, room_id: i64) {
        let mut state = self.state.lock().unwrap();
        state.rooms.remove(&room_id);
        state.member_rooms.retain(|_, room| *room != room_id);
    }

    pub fn vanish_listing(&self, listing_id: i64) {
        self.state.lock().unwrap().listings.remove(&listing_id);
    }

    pub fn vanish_message(&self, listing_id: i64, message_id: i64) {
        let mut state = self.state.lock().unwrap();
        if let Some(listing) = state.listings.get_mut(&listing_id) {
            listing.messages.remove(&message_id);
        }
    }

    /// Put a member straight into a room, bypassing admission.
    pub fn seat_member(&self, user_id: i64, room_id: i64) {
        let mut state = self.state.lock().unwrap();
        if let Some(previous) = state.member_rooms.insert(user_id, room_id) {
            if let Some(room) = state.rooms.get_mut(&previous) {
                room.members.retain(|member| *member != user_id);
            }
        }
        let room = state.rooms.get_mut(&room_id).expect("room exists");
        if !room.members.contains(&user_id) {
            room.members.push(user_id);
        }
    }

    pub fn add_role(&self, role_id: i64) {
        self.state.lock().unwrap().roles.insert(role_id);
    }

    pub fn set_member_roles(&self, user_id: i64, roles: Vec<i64>) {
        let mut state = self.state.lock().unwrap();
        for role in &roles {
            state.roles.insert(*role);
        }
        state.member_roles.insert(user_id, roles);
    }

    // Inspection

    pub fn room_count(&self) -> usize {
        self.state.lock().unwrap().rooms.len()
    }

    pub fn room_exists(&self, room_id: i64) -> bool {
        self.state.lock().unwrap().rooms.contains_key(&room_id)
    }

    pub fn room_members(&self, room_id: i64) -> Vec<i64> {
        self.state
            .lock()
            .unwrap()
            .rooms
            .get(&room_id)
            .map(|room| room.members.clone())
            .unwrap_or_default()
    }

    pub fn room_name(&self, room_id: i64) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .rooms
            .get(&room_id)
            .map(|room| room.name.clone())
    }

    pub fn listing_count(&self) -> usize {
        self.state.lock().unwrap().listings.len()
    }

    pub fn listing_title(&self, listing_id: i64) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .listings
            .get(&listing_id)
            .map(|listing| listing.title.clone())
    }

    pub fn listing_tags(&self, listing_id: i64) -> Vec<i64> {
        self.state
            .lock()
            .unwrap()
            .listings
            .get(&listing_id)
            .map(|listing| listing.tags.clone())
            .unwrap_or_default()
    }

    pub fn last_acl(&self, room_id: i64) -> Option<RoomAcl> {
        self.state
            .lock()
            .unwrap()
            .acl_log
            .iter()
            .rev()
            .find(|(room, _)| *room == room_id)
            .map(|(_, acl)| acl.clone())
    }
}

#[async_trait]
impl ChatPlatform for FakePlatform {
    async fn create_voice_room(
        &self,
        _guild_id: i64,
        name: &str,
        user_limit: u32,
    ) -> PlatformResult<i64> {
        let mut state = self.state.lock().unwrap();
        let id = Self::alloc(&mut state);
        state.rooms.insert(
            id,
            Room {
                name: name.to_string(),
                user_limit,
                members: Vec::new(),
            },
        );
        Ok(id)
    }

    async fn delete_voice_room(&self, _guild_id: i64, room_id: i64) -> PlatformResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.rooms.remove(&room_id).is_none() {
            return Err(PlatformError::NotFound);
        }
        state.member_rooms.retain(|_, room| *room != room_id);
        Ok(())
    }

    async fn rename_voice_room(
        &self,
        _guild_id: i64,
        room_id: i64,
        name: &str,
    ) -> PlatformResult<()> {
        let mut state = self.state.lock().unwrap();
        let room = state.rooms.get_mut(&room_id).ok_or(PlatformError::NotFound)?;
        room.name = name.to_string();
        Ok(())
    }

    async fn voice_room(&self, _guild_id: i64, room_id: i64) -> PlatformResult<Option<RoomInfo>> {
        let state = self.state.lock().unwrap();
        Ok(state.rooms.get(&room_id).map(|room| RoomInfo {
            id: room_id,
            name: room.name.clone(),
            user_limit: room.user_limit,
            members: room.members.clone(),
        }))
    }

    async fn apply_room_acl(
        &self,
        _guild_id: i64,
        room_id: i64,
        acl: &RoomAcl,
    ) -> PlatformResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_apply_acl {
            return Err(PlatformError::Transport("injected acl failure".into()));
        }
        if !state.rooms.contains_key(&room_id) {
            return Err(PlatformError::NotFound);
        }
        state.acl_log.push((room_id, acl.clone()));
        Ok(())
    }

    async fn move_member(
        &self,
        _guild_id: i64,
        user_id: i64,
        room_id: Option<i64>,
    ) -> PlatformResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(previous) = state.member_rooms.remove(&user_id) {
            if let Some(room) = state.rooms.get_mut(&previous) {
                room.members.retain(|member| *member != user_id);
            }
        }
        if let Some(room_id) = room_id {
            let room = state.rooms.get_mut(&room_id).ok_or(PlatformError::NotFound)?;
            room.members.push(user_id);
            state.member_rooms.insert(user_id, room_id);
        }
        Ok(())
    }

    async fn member_voice_room(
        &self,
        _guild_id: i64,
        user_id: i64,
    ) -> PlatformResult<Option<i64>> {
        Ok(self.state.lock().unwrap().member_rooms.get(&user_id).copied())
    }

    async fn member_roles(&self, _guild_id: i64, user_id: i64) -> PlatformResult<Vec<i64>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .member_roles
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn role_exists(&self, _guild_id: i64, role_id: i64) -> PlatformResult<bool> {
        Ok(self.state.lock().unwrap().roles.contains(&role_id))
    }

    async fn forum_exists(&self, _guild_id: i64, forum_id: i64) -> PlatformResult<bool> {
        Ok(self.state.lock().unwrap().forums.contains_key(&forum_id))
    }

    async fn create_forum(&self, _guild_id: i64, name: &str) -> PlatformResult<i64> {
        let mut state = self.state.lock().unwrap();
        let id = Self::alloc(&mut state);
        state.forums.insert(id, name.to_string());
        state.forum_tags.insert(id, Vec::new());
        Ok(id)
    }

    async fn create_listing(
        &self,
        _guild_id: i64,
        forum_id: i64,
        title: &str,
        body: &str,
    ) -> PlatformResult<i64> {
        let mut state = self.state.lock().unwrap();
        if state.fail_create_listing {
            return Err(PlatformError::Transport("injected listing failure".into()));
        }
        if !state.forums.contains_key(&forum_id) {
            return Err(PlatformError::NotFound);
        }
        let id = Self::alloc(&mut state);
        state.listings.insert(
            id,
            Listing {
                forum_id,
                title: title.to_string(),
                body: body.to_string(),
                tags: Vec::new(),
                messages: HashSet::new(),
            },
        );
        Ok(id)
    }

    async fn delete_listing(&self, _guild_id: i64, listing_id: i64) -> PlatformResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.listings.remove(&listing_id).is_none() {
            return Err(PlatformError::NotFound);
        }
        Ok(())
    }

    async fn update_listing(
        &self,
        _guild_id: i64,
        listing_id: i64,
        title: &str,
        body: &str,
    ) -> PlatformResult<()> {
        let mut state = self.state.lock().unwrap();
        let listing = state
            .listings
            .get_mut(&listing_id)
            .ok_or(PlatformError::NotFound)?;
        listing.title = title.to_string();
        listing.body = body.to_string();
        Ok(())
    }

    async fn listing_exists(&self, _guild_id: i64, listing_id: i64) -> PlatformResult<bool> {
        Ok(self.state.lock().unwrap().listings.contains_key(&listing_id))
    }

    async fn apply_listing_tags(
        &self,
        _guild_id: i64,
        listing_id: i64,
        tag_ids: &[i64],
    ) -> PlatformResult<()> {
        let mut state = self.state.lock().unwrap();
        let listing = state
            .listings
            .get_mut(&listing_id)
            .ok_or(PlatformError::NotFound)?;
        listing.tags = tag_ids.to_vec();
        Ok(())
    }

    async fn post_anchor_message(
        &self,
        _guild_id: i64,
        listing_id: i64,
        _content: &AnchorContent,
    ) -> PlatformResult<i64> {
        let mut state = self.state.lock().unwrap();
        if state.fail_post_anchor {
            return Err(PlatformError::Transport("injected anchor failure".into()));
        }
        if !state.listings.contains_key(&listing_id) {
            return Err(PlatformError::NotFound);
        }
        let id = Self::alloc(&mut state);
        state
            .listings
            .get_mut(&listing_id)
            .expect("listing present")
            .messages
            .insert(id);
        Ok(id)
    }

    async fn edit_anchor_message(
        &self,
        _guild_id: i64,
        listing_id: i64,
        message_id: i64,
        _content: &AnchorContent,
    ) -> PlatformResult<()> {
        let state = self.state.lock().unwrap();
        let listing = state.listings.get(&listing_id).ok_or(PlatformError::NotFound)?;
        if !listing.messages.contains(&message_id) {
            return Err(PlatformError::NotFound);
        }
        Ok(())
    }

    async fn post_prompt(
        &self,
        _guild_id: i64,
        listing_id: i64,
        _text: &str,
    ) -> PlatformResult<i64> {
        let mut state = self.state.lock().unwrap();
        if !state.listings.contains_key(&listing_id) {
            return Err(PlatformError::NotFound);
        }
        let id = Self::alloc(&mut state);
        state
            .listings
            .get_mut(&listing_id)
            .expect("listing present")
            .messages
            .insert(id);
        Ok(id)
    }

    async fn message_exists(
        &self,
        _guild_id: i64,
        listing_id: i64,
        message_id: i64,
    ) -> PlatformResult<bool> {
        let state = self.state.lock().unwrap();
        Ok(state
            .listings
            .get(&listing_id)
            .is_some_and(|listing| listing.messages.contains(&message_id)))
    }

    async fn forum_tags(&self, _guild_id: i64, forum_id: i64) -> PlatformResult<Vec<ForumTag>> {
        let state = self.state.lock().unwrap();
        state
            .forum_tags
            .get(&forum_id)
            .cloned()
            .ok_or(PlatformError::NotFound)
    }

    async fn create_forum_tag(
        &self,
        _guild_id: i64,
        forum_id: i64,
        name: &str,
    ) -> PlatformResult<i64> {
        let mut state = self.state.lock().unwrap();
        let id = Self::alloc(&mut state);
        let tags = state.forum_tags.get_mut(&forum_id).ok_or(PlatformError::NotFound)?;
        tags.push(ForumTag {
            id,
            name: name.to_string(),
        });
        Ok(id)
    }
}
