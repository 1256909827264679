//! Flat organization/user lists into a pruned recipient forest

use std::collections::HashMap;

use log::{debug, warn};

use super::{OrgItem, OrganizationItem, PersonItem, TreeMode};
use crate::client::models::{Organization, Person};

/// Build the recipient forest for a role.
///
/// Users hang under their organization (persons before sub-units), organizations
/// under their parent. An organization whose `parent_id` is missing, unknown, or
/// itself becomes a root. Organizations caught in a `parent_id` cycle are never
/// reached from a root; each such component is promoted to a root at its first
/// member in input order, so every organization is visited at most once.
///
/// In [`TreeMode::User`] organizations left without children are pruned bottom-up,
/// roots included; an empty `users` list therefore yields an empty forest.
/// In [`TreeMode::Org`] every organization is kept.
pub fn build_organization_tree(
    organizations: &[Organization],
    users: &[Person],
    mode: TreeMode,
) -> Vec<OrganizationItem> {
    let mut index: HashMap<u64, usize> = HashMap::with_capacity(organizations.len());
    let mut orgs: Vec<&Organization> = Vec::with_capacity(organizations.len());
    for org in organizations {
        if index.contains_key(&org.id) {
            warn!("Duplicate organization id {} ignored", org.id);
            continue;
        }
        index.insert(org.id, orgs.len());
        orgs.push(org);
    }

    let mut members: Vec<Vec<&Person>> = vec![Vec::new(); orgs.len()];
    for user in users {
        match index.get(&user.org_id) {
            Some(&slot) => members[slot].push(user),
            None => warn!(
                "User {} references unknown organization {}; skipped",
                user.id, user.org_id
            ),
        }
    }

    let mut sub_units: Vec<Vec<usize>> = vec![Vec::new(); orgs.len()];
    let mut roots = Vec::new();
    for (slot, org) in orgs.iter().enumerate() {
        match org.parent_id.and_then(|p| index.get(&p).copied()) {
            Some(parent) if parent != slot => sub_units[parent].push(slot),
            _ => roots.push(slot),
        }
    }

    let walker = Walker {
        orgs: &orgs,
        members: &members,
        sub_units: &sub_units,
        mode,
    };
    let mut visited = vec![false; orgs.len()];
    let mut forest = Vec::new();

    for slot in roots {
        forest.extend(walker.build(slot, &mut visited));
    }

    for slot in 0..orgs.len() {
        if !visited[slot] {
            warn!(
                "Organization {} is part of a parent cycle; promoted to root",
                orgs[slot].id
            );
            forest.extend(walker.build(slot, &mut visited));
        }
    }

    debug!(
        "Built recipient tree: {} roots from {} organizations, {} users ({:?} mode)",
        forest.len(),
        orgs.len(),
        users.len(),
        mode
    );

    forest
}

struct Walker<'a> {
    orgs: &'a [&'a Organization],
    members: &'a [Vec<&'a Person>],
    sub_units: &'a [Vec<usize>],
    mode: TreeMode,
}

/// An organization whose sub-units are still being walked
struct Frame<'a> {
    slot: usize,
    level: usize,
    leader: Option<&'a Person>,
    children: Vec<OrganizationItem>,
    next_sub: usize,
}

impl<'a> Walker<'a> {
    /// Build the subtree rooted at `root`; `None` when pruned.
    ///
    /// Depth-first with an explicit stack, so parent chains of any length are fine.
    fn build(&self, root: usize, visited: &mut [bool]) -> Option<OrganizationItem> {
        let mut stack = vec![self.enter(root, 0, visited)];
        loop {
            let top = stack.last_mut()?;
            match self.sub_units[top.slot].get(top.next_sub) {
                Some(&child) => {
                    top.next_sub += 1;
                    if !visited[child] {
                        let level = top.level + 1;
                        stack.push(self.enter(child, level, visited));
                    }
                }
                None => {
                    let done = stack.pop()?;
                    let item = self.finish(done);
                    match stack.last_mut() {
                        Some(parent) => parent.children.extend(item),
                        None => return item,
                    }
                }
            }
        }
    }

    /// Mark `slot` visited and attach its persons
    fn enter(&self, slot: usize, level: usize, visited: &mut [bool]) -> Frame<'a> {
        visited[slot] = true;

        let mut leader: Option<&'a Person> = None;
        let mut children = Vec::with_capacity(self.members[slot].len());
        for &person in &self.members[slot] {
            if person.is_leader && leader.is_none() {
                leader = Some(person);
            }
            children.push(OrganizationItem::Person(PersonItem {
                id: person.id,
                name: person.name.clone(),
                org_id: person.org_id,
                is_leader: person.is_leader,
                level: level + 1,
            }));
        }

        Frame {
            slot,
            level,
            leader,
            children,
            next_sub: 0,
        }
    }

    fn finish(&self, frame: Frame<'a>) -> Option<OrganizationItem> {
        if frame.children.is_empty() && self.mode == TreeMode::User {
            return None;
        }

        let org = self.orgs[frame.slot];
        Some(OrganizationItem::Org(OrgItem {
            id: org.id,
            name: org.name.clone(),
            parent_id: org.parent_id,
            level: frame.level,
            leader_id: frame.leader.map(|p| p.id),
            leader_name: frame.leader.map(|p| p.name.clone()),
            children: frame.children,
        }))
    }
}
