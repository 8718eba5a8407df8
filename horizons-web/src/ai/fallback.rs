//! Pre-written persona replies
//!
//! Shown in place of AI output when the backend is rate-limited, slow or
//! unreachable.

use super::persona::{PlanDuration, Persona};

const THERAPIST: &str = r#"I understand you're going through a difficult time. Based on what you've shared, here are some compassionate insights:

**Validation of Your Feelings:**
Your emotions are completely valid. Breakups and emotional challenges are among life's most difficult experiences, and it's okay to feel overwhelmed.

**What You're Experiencing:**
- It's normal to have good days and bad days
- Healing is not linear - there will be ups and downs
- Your feelings may change from hour to hour, and that's okay

**Immediate Support:**
1. **Practice Self-Compassion**: Treat yourself with the same kindness you'd offer a close friend
2. **Allow Yourself to Grieve**: Don't rush the process
3. **Maintain Routine**: Small daily structures can provide stability
4. **Reach Out**: Connect with trusted friends or family when you feel ready

**Remember:** You are stronger than you think, and this pain is temporary. Every day you get through is a step forward in your healing journey.

*If you're experiencing severe distress, please reach out to a mental health professional or call a helpline.*"#;

const PLANNER_TEMPLATE: &str = r#"**Your {} Recovery Action Plan**

**Week 1: Foundation & Self-Care**
- Day 1-2: Allow yourself to feel and process emotions
- Day 3-4: Establish a simple daily routine (sleep, meals, hygiene)
- Day 5-7: Start journaling 10 minutes daily
- Daily: Practice 5-minute breathing exercises

**Week 2: Rebuilding & Connection** (if applicable)
- Reconnect with one friend or family member
- Try one new activity or hobby
- Continue journaling - focus on gratitude
- Start light physical activity (walks, yoga)

**Daily Practices:**
✅ Morning: Set one small intention for the day
✅ Afternoon: Take a mindful break (5-10 minutes)
✅ Evening: Journal or reflect on one positive moment
✅ Night: Practice relaxation before bed

**Self-Care Checklist:**
- [ ] Drink 6-8 glasses of water daily
- [ ] Eat nutritious meals
- [ ] Get 7-8 hours of sleep
- [ ] Limit social media exposure
- [ ] Engage in one enjoyable activity

**Progress Markers:**
You'll know you're healing when:
- You have more good moments than bad
- You can think about the future with hope
- You're rediscovering your interests
- You feel more like yourself

*Adjust this plan to your pace. Healing isn't a race.*"#;

const CLOSURE: &str = r#"**Finding Closure & Letting Go**

Closure is something you give yourself, not something you receive from others. Here's how to create it:

**Understanding Closure:**
Closure doesn't mean forgetting or not caring. It means accepting what happened and choosing to move forward.

**Letting Go Rituals:**

1. **The Letter You'll Never Send**
   - Write everything you wish you could say
   - Be completely honest with your emotions
   - When finished, safely burn or shred it
   - This symbolizes releasing those feelings

2. **Memory Box Ritual**
   - Gather items that remind you of the relationship
   - Place them in a box
   - Store it away or donate/discard when ready
   - This creates physical distance

3. **Forgiveness Practice**
   - Forgive yourself for any perceived mistakes
   - Forgive them (this is for YOUR peace, not theirs)
   - Write: "I release you and I release myself"

**Reframing Your Story:**
Instead of "Why did this happen to me?"
Try: "What can I learn from this experience?"

**Signs You're Finding Closure:**
- You can think about them without intense pain
- You're not checking their social media
- You're excited about your own future
- You wish them well (even if from afar)

**Affirmation:**
"I am complete on my own. I honor what was, I accept what is, and I embrace what will be."

*Closure is a journey, not a destination. Be patient with yourself.*"#;

const HONESTY: &str = r#"**Reality Check: The Honest Truth You Need**

Let's be real for a moment, because sometimes we need tough love:

**The Hard Truths:**
1. **They're Not Coming Back** - And that's actually okay. If they wanted to be with you, they would be. Stop waiting.

2. **Stalking Social Media Hurts YOU** - Every time you check their profile, you're reopening the wound. Block, mute, or delete. Your healing > your curiosity.

3. **You're Romanticizing the Past** - Your brain is playing highlight reels. Remember the bad times too. There's a reason it ended.

4. **No Contact Means NO CONTACT** - Not "just one text." Not "happy birthday." Not "I saw this and thought of you." NONE.

**What You Need to Do:**
- **Stop Making Excuses**: For them, for the relationship, for why you're still stuck
- **Delete the Number**: Yes, really. You have it memorized? Change your phone.
- **Unfollow Everywhere**: Instagram, Facebook, Twitter, LinkedIn - everywhere
- **Remove Reminders**: Photos, gifts, that hoodie - box it up or toss it

**The Brutal Reality:**
- They're probably not thinking about you as much as you're thinking about them
- Begging or pleading will NEVER work - it only pushes them further away
- You cannot "fix" this by being perfect - it's over, and that's final

**But Here's the GOOD News:**
- You're wasting energy on someone who doesn't want you when you could be finding someone who does
- Every day you spend healing is a day closer to being happy again
- You WILL love again, and it will be better because you'll know what you deserve

**Your Action Plan:**
1. Block/delete them TODAY
2. Tell your friends to stop updating you about them
3. Focus on YOU - gym, hobbies, career, friends
4. Give yourself 90 days of strict no contact
5. Watch how much better you feel

**Bottom Line:**
You deserve someone who chooses you every single day without hesitation. This person didn't. So stop choosing them. Choose yourself instead.

*This might sting now, but future you will thank you for reading this.*"#;

/// Fallback markdown for `persona`
///
/// Only the planner text varies: it names the plan duration upper-cased.
pub fn fallback_reply(persona: Persona, plan: PlanDuration) -> String {
    match persona {
        Persona::Therapist => THERAPIST.to_string(),
        Persona::Planner => planner_reply(plan),
        Persona::Closure => CLOSURE.to_string(),
        Persona::Honesty => HONESTY.to_string(),
    }
}

fn planner_reply(plan: PlanDuration) -> String {
    PLANNER_TEMPLATE.replacen("{}", &plan.as_str().to_uppercase(), 1)
}
